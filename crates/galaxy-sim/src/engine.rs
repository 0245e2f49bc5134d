//! Simulation engine: owns the world and runs the systems each tick.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless
//! (no threads), enabling deterministic testing.

use std::collections::{BTreeSet, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use galaxy_core::commands::PlayerCommand;
use galaxy_core::components::{Planet, PlanetId, Ship, ShipId};
use galaxy_core::enums::ClockState;
use galaxy_core::errors::{LaunchError, SetupError};
use galaxy_core::events::SimEvent;
use galaxy_core::party::{PartyId, PartyRegistry};
use galaxy_core::state::{GameStateSnapshot, LaunchOutcome, LaunchRejection, ShipView};
use galaxy_core::types::{SimTime, Vector};

use crate::config::SimConfig;
use crate::systems;
use crate::systems::snapshot::Selection;
use crate::world_setup::{self, PlanetLayout};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    parties: PartyRegistry,
    time: SimTime,
    clock: ClockState,
    rng: ChaCha8Rng,
    /// Planet entities indexed by `PlanetId`. Planets are never despawned.
    planet_entities: Vec<Entity>,
    next_ship_id: u32,
    selection: Selection,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    /// Events since the last completed tick.
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine with randomly placed planets.
    pub fn new(config: SimConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let parties = PartyRegistry::new(&config.parties);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let layout = world_setup::random_layout(&config, &parties, &mut rng)?;
        Ok(Self::build(config, parties, rng, &layout))
    }

    /// Create an engine from an explicit planet layout.
    pub fn with_layout(config: SimConfig, layout: &[PlanetLayout]) -> Result<Self, SetupError> {
        config.validate()?;
        let parties = PartyRegistry::new(&config.parties);
        world_setup::validate_layout(&config, &parties, layout)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self::build(config, parties, rng, layout))
    }

    fn build(
        config: SimConfig,
        parties: PartyRegistry,
        rng: ChaCha8Rng,
        layout: &[PlanetLayout],
    ) -> Self {
        let mut world = World::new();
        let planet_entities = world_setup::spawn_planets(&mut world, layout);
        info!(
            planets = planet_entities.len(),
            seed = config.seed,
            "simulation world ready"
        );

        Self {
            world,
            config,
            parties,
            time: SimTime::default(),
            clock: ClockState::default(),
            rng,
            planet_entities,
            next_ship_id: 0,
            selection: Selection::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Leave `Idle`. Has no effect once running.
    pub fn start(&mut self) {
        if self.clock == ClockState::Idle {
            self.clock = ClockState::Running;
            info!(tick_rate = self.config.tick_rate, "simulation clock running");
        }
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// While idle only queued commands are applied.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.clock == ClockState::Running {
            self.run_systems();
            self.time.advance(f64::from(self.config.dt()));
        }

        let snapshot = self.snapshot();
        self.events.clear();
        snapshot
    }

    /// Point-in-time view of the world. Identical between two ticks.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.clock,
            &self.parties,
            &self.selection,
            &self.events,
        )
    }

    /// Launch one ship from every planet in `from` toward `to` on behalf of
    /// `party`. Duplicate sources launch once. Sources that are unknown, equal
    /// to `to`, or not owned by `party` are rejected without affecting the rest.
    pub fn launch(&mut self, party: PartyId, from: &[PlanetId], to: PlanetId) -> LaunchOutcome {
        let mut outcome = LaunchOutcome::default();
        let sources: BTreeSet<PlanetId> = from.iter().copied().collect();

        let dest = self.planet(to);
        for source_id in sources {
            let result = dest
                .as_ref()
                .ok_or(LaunchError::UnknownPlanet(to))
                .and_then(|dest| self.launch_one(party, source_id, dest));

            match result {
                Ok(ship) => outcome.launched.push(ship),
                Err(reason) => {
                    debug!(source = source_id.0, dest = to.0, %reason, "launch rejected");
                    outcome.rejected.push(LaunchRejection {
                        planet: source_id,
                        reason,
                    });
                }
            }
        }

        outcome
    }

    fn launch_one(
        &mut self,
        party: PartyId,
        source_id: PlanetId,
        dest: &Planet,
    ) -> Result<ShipView, LaunchError> {
        let source = self
            .planet(source_id)
            .ok_or(LaunchError::UnknownPlanet(source_id))?;
        if source.id == dest.id {
            return Err(LaunchError::SameSourceAndDestination(source.id));
        }
        if source.party != party {
            return Err(LaunchError::NotOwner(source.id));
        }

        let id = ShipId(self.next_ship_id);
        self.next_ship_id += 1;

        let ship = world_setup::build_ship(&self.config, &mut self.rng, id, &source, dest);
        debug!(
            ship = id.0,
            source = source.id.0,
            dest = dest.id.0,
            path_len = ship.path.len(),
            "ship launched"
        );
        let view = systems::snapshot::ship_view(&ship);
        self.events.push(SimEvent::ShipLaunched {
            ship: id,
            party: ship.party,
            source: ship.source,
            dest: ship.dest,
        });
        self.world.spawn((ship,));
        Ok(view)
    }

    /// First planet (in placement order) whose hit area contains `point`,
    /// optionally restricted to planets owned by `owner`.
    pub fn planet_at(&self, point: Vector, owner: Option<PartyId>) -> Option<PlanetId> {
        self.planet_entities.iter().find_map(|&entity| {
            let planet = self.world.get::<&Planet>(entity).ok()?;
            let owned = owner.map_or(true, |party| planet.party == party);
            let hit = planet.position.distance_to(&point) < planet.size + self.config.hit_margin;
            (owned && hit).then_some(planet.id)
        })
    }

    /// A copy of the planet with the given id.
    pub fn planet(&self, id: PlanetId) -> Option<Planet> {
        let entity = *self.planet_entities.get(id.0 as usize)?;
        self.world.get::<&Planet>(entity).ok().map(|p| (*p).clone())
    }

    /// A copy of a live ship.
    pub fn ship(&self, id: ShipId) -> Option<Ship> {
        self.world
            .query::<&Ship>()
            .iter()
            .find(|(_, ship)| ship.id == id)
            .map(|(_, ship)| ship.clone())
    }

    pub fn planet_ids(&self) -> impl Iterator<Item = PlanetId> + '_ {
        (0..self.planet_entities.len()).map(|i| PlanetId(i as u32))
    }

    pub fn ship_count(&self) -> usize {
        self.world.query::<&Ship>().iter().count()
    }

    pub fn clock(&self) -> ClockState {
        self.clock
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn parties(&self) -> &PartyRegistry {
        &self.parties
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Start => self.start(),
            PlayerCommand::Launch { party, from, to } => {
                self.launch(party, &from, to);
            }
            PlayerCommand::SelectSource { party, planet } => {
                if self.planet(planet).is_some_and(|p| p.party == party) {
                    self.selection.sources.insert(planet);
                }
            }
            PlayerCommand::SetTarget { planet } => {
                self.selection.target = planet.filter(|id| self.planet(*id).is_some());
            }
            PlayerCommand::LaunchSelection { party, to } => {
                let sources: Vec<PlanetId> = self.selection.sources.iter().copied().collect();
                self.launch(party, &sources, to);
                self.selection = Selection::default();
            }
            PlayerCommand::ClearSelection => {
                self.selection = Selection::default();
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.config.dt();
        let cap = self.config.energy_cap;
        // 1. Planet growth
        systems::growth::run(&mut self.world, dt, cap);
        // 2. Path following
        systems::movement::run(&mut self.world);
        // 3. Collision + combat
        systems::collision::run(
            &mut self.world,
            &self.planet_entities,
            cap,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 4. Remove ships that hit
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
