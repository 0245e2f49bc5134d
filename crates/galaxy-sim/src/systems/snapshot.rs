//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only; never modifies the world.

use std::collections::BTreeSet;

use hecs::World;

use galaxy_core::components::{Planet, PlanetId, Ship};
use galaxy_core::enums::ClockState;
use galaxy_core::events::SimEvent;
use galaxy_core::party::PartyRegistry;
use galaxy_core::state::*;
use galaxy_core::types::SimTime;

/// Drag selection as seen by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub sources: BTreeSet<PlanetId>,
    pub target: Option<PlanetId>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    clock: ClockState,
    parties: &PartyRegistry,
    selection: &Selection,
    events: &[SimEvent],
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        clock,
        parties: parties.iter().cloned().collect(),
        planets: build_planets(world, selection),
        ships: build_ships(world),
        events: events.to_vec(),
    }
}

fn build_planets(world: &World, selection: &Selection) -> Vec<PlanetView> {
    let mut planets: Vec<PlanetView> = world
        .query::<&Planet>()
        .iter()
        .map(|(_, planet)| planet_view(planet, selection))
        .collect();

    planets.sort_by_key(|p| p.id);
    planets
}

fn build_ships(world: &World) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<&Ship>()
        .iter()
        .map(|(_, ship)| ship_view(ship))
        .collect();

    ships.sort_by_key(|s| s.id);
    ships
}

pub fn planet_view(planet: &Planet, selection: &Selection) -> PlanetView {
    PlanetView {
        id: planet.id,
        party: planet.party,
        position: planet.position,
        size: planet.size,
        energy: planet.energy,
        growth_rate: planet.growth_rate,
        selected: selection.sources.contains(&planet.id),
        targeted: selection.target == Some(planet.id),
    }
}

pub fn ship_view(ship: &Ship) -> ShipView {
    ShipView {
        id: ship.id,
        party: ship.party,
        source: ship.source,
        dest: ship.dest,
        position: ship.position(),
        control_points: ship.control_points,
        path_index: ship.path_index,
        path_len: ship.path.len(),
    }
}
