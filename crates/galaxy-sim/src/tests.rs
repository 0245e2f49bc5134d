//! Tests for the simulation engine: setup, launches, ticking and combat.

use hecs::World;

use galaxy_core::commands::PlayerCommand;
use galaxy_core::components::{PlanetId, Ship, ShipId};
use galaxy_core::constants::CONQUEST_RESET_ENERGY;
use galaxy_core::enums::ClockState;
use galaxy_core::errors::{LaunchError, SetupError};
use galaxy_core::events::SimEvent;
use galaxy_core::party::{PartyId, PartyRegistry};
use galaxy_core::types::Vector;

use crate::config::{FieldBounds, SimConfig};
use crate::engine::SimulationEngine;
use crate::world_setup::PlanetLayout;

const PLAYER: PartyId = PartyId(0);
const COMPUTER: PartyId = PartyId(1);
const NEUTRAL: PartyId = PartyId(2);

fn planet(party: PartyId, x: f32, y: f32, energy: f32, growth_rate: f32) -> PlanetLayout {
    PlanetLayout {
        party,
        position: Vector::new(x, y),
        size: 20.0,
        energy,
        growth_rate,
    }
}

/// Player home at the top, computer home at the bottom, nothing between.
fn duel_engine(dest_party: PartyId, dest_energy: f32) -> SimulationEngine {
    let layout = [
        planet(PLAYER, 60.0, 60.0, 5.0, 5.0),
        planet(dest_party, 260.0, 340.0, dest_energy, 0.0),
    ];
    let mut engine = SimulationEngine::with_layout(SimConfig::default(), &layout).unwrap();
    engine.start();
    engine
}

fn run_until_no_ships(engine: &mut SimulationEngine, max_ticks: usize) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        let snapshot = engine.tick();
        events.extend(snapshot.events);
        if engine.ship_count() == 0 {
            break;
        }
    }
    events
}

fn first_ship(engine: &SimulationEngine) -> Ship {
    let snapshot = engine.snapshot();
    engine.ship(snapshot.ships[0].id).unwrap()
}

// ---- Setup ----

#[test]
fn test_default_placement() {
    let engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let config = engine.config().clone();
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.planets.len(), config.planet_count);
    assert_eq!(snapshot.planets[0].party, engine.parties().player());
    assert_eq!(snapshot.planets[1].party, engine.parties().computer());
    for planet in &snapshot.planets[2..] {
        assert_eq!(planet.party, engine.parties().neutral());
    }

    for planet in &snapshot.planets {
        assert!([20.0, 25.0, 30.0].contains(&planet.size));
        assert_eq!(planet.energy, config.initial_energy);
        assert_eq!(planet.growth_rate, config.growth_rate);
        let field = config.field;
        assert!(planet.position.x >= field.border && planet.position.x <= field.width - field.border);
        assert!(planet.position.y >= field.border && planet.position.y <= field.height - field.border);
    }

    for (i, a) in snapshot.planets.iter().enumerate() {
        for b in &snapshot.planets[i + 1..] {
            let gap = a.position.distance_to(&b.position);
            assert!(
                gap >= a.size + b.size + config.separation_margin,
                "planets {:?} and {:?} overlap",
                a.id,
                b.id
            );
        }
    }
}

#[test]
fn test_same_seed_same_layout() {
    let a = SimulationEngine::new(SimConfig::default()).unwrap();
    let b = SimulationEngine::new(SimConfig::default()).unwrap();
    assert_eq!(a.snapshot(), b.snapshot());

    let c = SimulationEngine::new(SimConfig {
        seed: 7,
        ..Default::default()
    })
    .unwrap();
    assert_ne!(a.snapshot().planets, c.snapshot().planets);
}

#[test]
fn test_placement_exhaustion_is_an_error() {
    let config = SimConfig {
        field: FieldBounds {
            width: 100.0,
            height: 100.0,
            border: 30.0,
        },
        planet_count: 6,
        ..Default::default()
    };
    let result = SimulationEngine::new(config);
    assert!(matches!(result, Err(SetupError::PlacementExhausted { .. })));
}

#[test]
fn test_invalid_config_rejected() {
    let config = SimConfig {
        tick_rate: 0.0,
        ..Default::default()
    };
    assert!(matches!(SimulationEngine::new(config), Err(SetupError::Config(_))));

    let config = SimConfig {
        planet_count: 1,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    // Tick period would not fit in a Duration.
    let config = SimConfig {
        tick_rate: 1e-30,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = SimConfig {
        tick_rate: 0.01,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

fn layout_error(layout: &[PlanetLayout], config: SimConfig) -> Option<(usize, &'static str)> {
    match SimulationEngine::with_layout(config, layout) {
        Err(SetupError::InvalidLayout { index, reason }) => Some((index, reason)),
        _ => None,
    }
}

#[test]
fn test_layout_rejects_negative_energy() {
    let layout = [
        planet(PLAYER, 60.0, 60.0, -5.0, 5.0),
        planet(COMPUTER, 260.0, 340.0, 0.0, 5.0),
    ];
    assert_eq!(layout_error(&layout, SimConfig::default()).map(|e| e.0), Some(0));

    let layout = [
        planet(PLAYER, 60.0, 60.0, 0.0, 5.0),
        planet(COMPUTER, 260.0, 340.0, f32::NAN, 5.0),
    ];
    assert_eq!(layout_error(&layout, SimConfig::default()).map(|e| e.0), Some(1));
}

#[test]
fn test_layout_rejects_energy_above_cap() {
    let config = SimConfig {
        energy_cap: Some(10.0),
        ..Default::default()
    };
    let layout = [
        planet(PLAYER, 60.0, 60.0, 10.0, 5.0),
        planet(COMPUTER, 260.0, 340.0, 11.0, 5.0),
    ];
    assert_eq!(layout_error(&layout, config).map(|e| e.0), Some(1));
}

#[test]
fn test_layout_rejects_non_positive_size() {
    let mut dest = planet(COMPUTER, 260.0, 340.0, 0.0, 5.0);
    dest.size = 0.0;
    let layout = [planet(PLAYER, 60.0, 60.0, 0.0, 5.0), dest];
    assert_eq!(layout_error(&layout, SimConfig::default()).map(|e| e.0), Some(1));
}

#[test]
fn test_layout_rejects_unregistered_party() {
    let layout = [
        planet(PLAYER, 60.0, 60.0, 0.0, 5.0),
        planet(PartyId(7), 260.0, 340.0, 0.0, 5.0),
    ];
    assert_eq!(layout_error(&layout, SimConfig::default()).map(|e| e.0), Some(1));
}

#[test]
fn test_layout_rejects_negative_growth() {
    let layout = [
        planet(PLAYER, 60.0, 60.0, 0.0, -3.0),
        planet(COMPUTER, 260.0, 340.0, 0.0, 5.0),
    ];
    assert_eq!(layout_error(&layout, SimConfig::default()).map(|e| e.0), Some(0));
}

#[test]
fn test_layout_rejects_non_finite_position() {
    let layout = [
        planet(PLAYER, f32::INFINITY, 60.0, 0.0, 5.0),
        planet(COMPUTER, 260.0, 340.0, 0.0, 5.0),
    ];
    assert_eq!(layout_error(&layout, SimConfig::default()).map(|e| e.0), Some(0));
}

#[test]
fn test_valid_layout_accepted() {
    let layout = [
        planet(PLAYER, 60.0, 60.0, 0.0, 5.0),
        planet(NEUTRAL, 260.0, 340.0, 0.0, 0.0),
    ];
    assert!(SimulationEngine::with_layout(SimConfig::default(), &layout).is_ok());
}

#[test]
fn test_config_from_partial_json() {
    let config = SimConfig::from_json_str(r#"{ "seed": 9, "tick_rate": 20.0 }"#).unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.tick_rate, 20.0);
    assert_eq!(config.planet_count, SimConfig::default().planet_count);
    assert!((config.dt() - 0.05).abs() < 1e-6);

    assert!(SimConfig::from_json_str(r#"{ "tick_rate": -1.0 }"#).is_err());
    assert!(SimConfig::from_json_str("not json").is_err());
}

// ---- Clock ----

#[test]
fn test_idle_tick_does_nothing() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let before = engine.snapshot();
    let after = engine.tick();
    assert_eq!(after.clock, ClockState::Idle);
    assert_eq!(after.time.tick, 0);
    assert_eq!(before.planets, after.planets);
}

#[test]
fn test_start_command_runs_clock() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::Start);
    let snapshot = engine.tick();
    assert_eq!(snapshot.clock, ClockState::Running);
    assert_eq!(snapshot.time.tick, 1);
    assert!((snapshot.time.elapsed_secs - 0.1).abs() < 1e-6);
}

#[test]
fn test_growth_per_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.start();
    for _ in 0..10 {
        engine.tick();
    }
    // 10 ticks at 10 Hz = 1 second at 5 energy/s.
    for planet in engine.snapshot().planets {
        assert!((planet.energy - 5.0).abs() < 1e-4, "energy {}", planet.energy);
    }
}

#[test]
fn test_growth_capped() {
    let config = SimConfig {
        energy_cap: Some(2.0),
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(config).unwrap();
    engine.start();
    for _ in 0..50 {
        engine.tick();
    }
    for planet in engine.snapshot().planets {
        assert_eq!(planet.energy, 2.0);
    }
}

// ---- Launch ----

#[test]
fn test_launch_creates_one_ship() {
    let mut engine = duel_engine(COMPUTER, 3.0);
    let outcome = engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1));

    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.launched.len(), 1);
    let view = &outcome.launched[0];
    assert_eq!(view.party, PLAYER);
    assert_eq!(view.source, PlanetId(0));
    assert_eq!(view.dest, PlanetId(1));
    assert_eq!(view.path_index, 0);
    assert_eq!(view.position, Vector::new(60.0, 60.0));
    assert!((100..150).contains(&view.path_len));
    assert_eq!(engine.ship_count(), 1);

    let ship = first_ship(&engine);
    assert_eq!(ship.path[ship.path.len() - 1], Vector::new(260.0, 340.0));
    assert_eq!(ship.speed, engine.config().ship_speed);
}

#[test]
fn test_launch_does_not_cost_energy() {
    let mut engine = duel_engine(COMPUTER, 3.0);
    engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1));
    assert_eq!(engine.planet(PlanetId(0)).unwrap().energy, 5.0);
}

#[test]
fn test_launch_rejections() {
    let mut engine = duel_engine(COMPUTER, 3.0);

    let outcome = engine.launch(PLAYER, &[PlanetId(1)], PlanetId(0));
    assert!(outcome.launched.is_empty());
    assert_eq!(outcome.rejected[0].reason, LaunchError::NotOwner(PlanetId(1)));

    let outcome = engine.launch(PLAYER, &[PlanetId(0)], PlanetId(0));
    assert_eq!(
        outcome.rejected[0].reason,
        LaunchError::SameSourceAndDestination(PlanetId(0))
    );

    let outcome = engine.launch(PLAYER, &[PlanetId(9)], PlanetId(1));
    assert_eq!(outcome.rejected[0].reason, LaunchError::UnknownPlanet(PlanetId(9)));

    let outcome = engine.launch(PLAYER, &[PlanetId(0)], PlanetId(9));
    assert_eq!(outcome.rejected[0].reason, LaunchError::UnknownPlanet(PlanetId(9)));

    assert_eq!(engine.ship_count(), 0);
}

#[test]
fn test_launch_partial_rejection_and_dedup() {
    let mut engine = duel_engine(COMPUTER, 3.0);
    let outcome = engine.launch(PLAYER, &[PlanetId(0), PlanetId(0), PlanetId(1)], PlanetId(1));
    assert_eq!(outcome.launched.len(), 1);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(engine.ship_count(), 1);
}

#[test]
fn test_launch_event_reported_on_next_tick() {
    let mut engine = duel_engine(COMPUTER, 3.0);
    engine.tick();
    let outcome = engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1));
    let ship = outcome.launched[0].id;

    assert!(matches!(
        engine.snapshot().events.as_slice(),
        [SimEvent::ShipLaunched { .. }]
    ));
    let snapshot = engine.tick();
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::ShipLaunched { ship: s, .. } if *s == ship)));
    assert!(engine.snapshot().events.is_empty());
}

#[test]
fn test_independent_paths_for_simultaneous_launches() {
    let layout = [
        planet(PLAYER, 160.0, 60.0, 5.0, 5.0),
        planet(COMPUTER, 60.0, 340.0, 0.0, 0.0),
        planet(NEUTRAL, 260.0, 340.0, 0.0, 0.0),
    ];
    let mut engine = SimulationEngine::with_layout(SimConfig::default(), &layout).unwrap();
    let a = engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1)).launched[0].clone();
    let b = engine.launch(PLAYER, &[PlanetId(0)], PlanetId(2)).launched[0].clone();

    assert_ne!(a.id, b.id);
    assert_ne!(a.control_points, b.control_points);
    assert_eq!(engine.ship_count(), 2);
}

// ---- Movement and combat ----

#[test]
fn test_ship_hits_hostile_destination() {
    let mut engine = duel_engine(COMPUTER, 3.0);
    let view = engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1)).launched[0].clone();

    let events = run_until_no_ships(&mut engine, 200);
    assert_eq!(engine.ship_count(), 0);
    assert!(events.contains(&SimEvent::Damaged {
        ship: view.id,
        planet: PlanetId(1),
        energy: 2.0,
    }));
    let dest = engine.planet(PlanetId(1)).unwrap();
    assert_eq!(dest.energy, 2.0);
    assert_eq!(dest.party, COMPUTER);
}

#[test]
fn test_ship_reinforces_friendly_destination() {
    let mut engine = duel_engine(PLAYER, 3.0);
    engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1));
    let events = run_until_no_ships(&mut engine, 200);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::Reinforced { planet, .. } if *planet == PlanetId(1))));
    assert_eq!(engine.planet(PlanetId(1)).unwrap().energy, 4.0);
}

#[test]
fn test_ship_conquers_empty_planet() {
    let mut engine = duel_engine(NEUTRAL, 0.0);
    engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1));
    let events = run_until_no_ships(&mut engine, 200);

    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::Conquered { planet, previous, party, .. }
            if *planet == PlanetId(1) && *previous == NEUTRAL && *party == PLAYER
    )));
    let dest = engine.planet(PlanetId(1)).unwrap();
    assert_eq!(dest.party, PLAYER);
    assert_eq!(dest.energy, CONQUEST_RESET_ENERGY);
}

#[test]
fn test_ship_parks_on_destination_until_hit() {
    let mut engine = duel_engine(COMPUTER, 3.0);
    engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1));
    let ship = first_ship(&engine);

    let mut previous_index = 0;
    for _ in 0..200 {
        let snapshot = engine.tick();
        match snapshot.ships.first() {
            Some(view) => {
                assert!(view.path_index >= previous_index);
                assert!(view.path_index < view.path_len);
                previous_index = view.path_index;
            }
            None => break,
        }
    }
    assert_eq!(engine.ship_count(), 0);
    assert!(previous_index < ship.path.len());
}

#[test]
fn test_ship_never_hits_its_source() {
    // Destination overlaps the source so the ship starts inside both.
    let layout = [
        planet(PLAYER, 100.0, 100.0, 5.0, 0.0),
        planet(COMPUTER, 110.0, 100.0, 5.0, 0.0),
    ];
    let mut engine = SimulationEngine::with_layout(SimConfig::default(), &layout).unwrap();
    engine.start();
    engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1));

    let events = run_until_no_ships(&mut engine, 5);
    let hits: Vec<_> = events
        .iter()
        .filter(|e| !matches!(e, SimEvent::ShipLaunched { .. }))
        .collect();
    assert_eq!(hits.len(), 1);
    assert!(matches!(hits[0], SimEvent::Damaged { planet, .. } if *planet == PlanetId(1)));
    assert_eq!(engine.planet(PlanetId(0)).unwrap().energy, 5.0);
}

#[test]
fn test_first_planet_in_order_wins() {
    // Planets 1 and 2 overlap; the straight path reaches both in the same region.
    let layout = [
        planet(PLAYER, 50.0, 200.0, 5.0, 0.0),
        PlanetLayout {
            size: 30.0,
            ..planet(NEUTRAL, 200.0, 200.0, 5.0, 0.0)
        },
        PlanetLayout {
            size: 30.0,
            ..planet(COMPUTER, 205.0, 200.0, 5.0, 0.0)
        },
    ];
    let mut engine = SimulationEngine::with_layout(SimConfig::default(), &layout).unwrap();
    engine.start();
    engine.launch(PLAYER, &[PlanetId(0)], PlanetId(2));

    let events = run_until_no_ships(&mut engine, 200);
    let hits: Vec<_> = events
        .iter()
        .filter(|e| !matches!(e, SimEvent::ShipLaunched { .. }))
        .collect();
    assert_eq!(hits.len(), 1, "a ship resolves against one planet only");
    assert!(matches!(hits[0], SimEvent::Damaged { planet, .. } if *planet == PlanetId(1)));
    assert_eq!(engine.planet(PlanetId(2)).unwrap().energy, 5.0);
}

#[test]
fn test_energy_never_negative_in_long_game() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.start();
    let parties = PartyRegistry::default();
    let player = parties.player();
    let computer = parties.computer();

    for round in 0..600 {
        if round % 3 == 0 {
            let snapshot = engine.snapshot();
            let target = PlanetId((round / 3 % snapshot.planets.len()) as u32);
            let player_planets: Vec<PlanetId> = snapshot
                .planets
                .iter()
                .filter(|p| p.party == player)
                .map(|p| p.id)
                .collect();
            let computer_planets: Vec<PlanetId> = snapshot
                .planets
                .iter()
                .filter(|p| p.party == computer)
                .map(|p| p.id)
                .collect();
            engine.launch(player, &player_planets, target);
            engine.launch(computer, &computer_planets, target);
        }

        let snapshot = engine.tick();
        for planet in &snapshot.planets {
            assert!(planet.energy >= 0.0, "planet {:?} went negative", planet.id);
        }
    }
}

// ---- Snapshot ----

#[test]
fn test_snapshot_idempotent() {
    let mut engine = duel_engine(COMPUTER, 3.0);
    engine.launch(PLAYER, &[PlanetId(0)], PlanetId(1));
    engine.tick();
    engine.tick();
    assert_eq!(engine.snapshot(), engine.snapshot());
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig::default()).unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig::default()).unwrap();
    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_commands([
            PlayerCommand::Start,
            PlayerCommand::Launch {
                party: PLAYER,
                from: vec![PlanetId(0)],
                to: PlanetId(1),
            },
        ]);
    }

    for _ in 0..200 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

// ---- Selection and hit testing ----

#[test]
fn test_selection_commands() {
    let layout = [
        planet(PLAYER, 60.0, 60.0, 5.0, 0.0),
        planet(PLAYER, 260.0, 60.0, 5.0, 0.0),
        planet(COMPUTER, 160.0, 340.0, 5.0, 0.0),
    ];
    let mut engine = SimulationEngine::with_layout(SimConfig::default(), &layout).unwrap();

    engine.queue_commands([
        PlayerCommand::SelectSource {
            party: PLAYER,
            planet: PlanetId(0),
        },
        PlayerCommand::SelectSource {
            party: PLAYER,
            planet: PlanetId(1),
        },
        // Not owned by the player: ignored.
        PlayerCommand::SelectSource {
            party: PLAYER,
            planet: PlanetId(2),
        },
        PlayerCommand::SetTarget {
            planet: Some(PlanetId(2)),
        },
    ]);
    let snapshot = engine.tick();
    let selected: Vec<bool> = snapshot.planets.iter().map(|p| p.selected).collect();
    assert_eq!(selected, vec![true, true, false]);
    assert!(snapshot.planets[2].targeted);

    engine.queue_command(PlayerCommand::LaunchSelection {
        party: PLAYER,
        to: PlanetId(2),
    });
    let snapshot = engine.tick();
    assert_eq!(snapshot.ships.len(), 2);
    assert!(snapshot.planets.iter().all(|p| !p.selected && !p.targeted));
}

#[test]
fn test_clear_selection() {
    let mut engine = duel_engine(COMPUTER, 3.0);
    engine.queue_commands([
        PlayerCommand::SelectSource {
            party: PLAYER,
            planet: PlanetId(0),
        },
        PlayerCommand::ClearSelection,
    ]);
    let snapshot = engine.tick();
    assert!(snapshot.planets.iter().all(|p| !p.selected));
}

#[test]
fn test_planet_at() {
    let engine = duel_engine(COMPUTER, 3.0);
    // Size 20 + hit margin 30.
    assert_eq!(engine.planet_at(Vector::new(60.0, 60.0), None), Some(PlanetId(0)));
    assert_eq!(engine.planet_at(Vector::new(105.0, 60.0), None), Some(PlanetId(0)));
    assert_eq!(engine.planet_at(Vector::new(115.0, 60.0), None), None);
    assert_eq!(engine.planet_at(Vector::new(260.0, 340.0), Some(PLAYER)), None);
    assert_eq!(
        engine.planet_at(Vector::new(260.0, 340.0), Some(COMPUTER)),
        Some(PlanetId(1))
    );
}

// ---- Systems ----

fn parked_ship() -> Ship {
    Ship {
        id: ShipId(0),
        party: PLAYER,
        source: PlanetId(0),
        dest: PlanetId(1),
        control_points: [Vector::ZERO, Vector::ZERO],
        path: vec![Vector::new(0.0, 0.0), Vector::new(10.0, 10.0)],
        path_index: 1,
        speed: 20.0,
    }
}

#[test]
fn test_movement_leaves_parked_ship() {
    let mut world = World::new();
    let entity = world.spawn((parked_ship(),));

    crate::systems::movement::run(&mut world);

    let ship = world.get::<&Ship>(entity).unwrap();
    assert!(ship.has_arrived());
    assert_eq!(ship.path_index, 1);
    assert_eq!(ship.position(), Vector::new(10.0, 10.0));
}

#[test]
fn test_cleanup_tolerates_repeated_entity() {
    let mut world = World::new();
    let entity = world.spawn((parked_ship(),));
    let mut buffer = vec![entity, entity];

    crate::systems::cleanup::run(&mut world, &mut buffer);

    assert!(buffer.is_empty());
    assert!(!world.contains(entity));
}
