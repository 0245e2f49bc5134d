//! Collision system: tests every ship against every planet and resolves combat.

use hecs::{Entity, World};
use tracing::{debug, info, warn};

use galaxy_core::components::{Planet, PlanetId, Ship, ShipId};
use galaxy_core::enums::CombatOutcome;
use galaxy_core::events::SimEvent;
use galaxy_core::party::PartyId;
use galaxy_core::types::Vector;

struct ShipProbe {
    entity: Entity,
    id: ShipId,
    party: PartyId,
    source: PlanetId,
    position: Vector,
}

/// Resolve collisions for this tick.
///
/// Ships are visited in launch order and planets in placement order. A ship
/// never hits its own source, and only the first planet it overlaps counts.
/// Ships that hit are pushed to `despawn_buffer`.
pub fn run(
    world: &mut World,
    planet_entities: &[Entity],
    energy_cap: Option<f32>,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    let mut probes: Vec<ShipProbe> = world
        .query::<&Ship>()
        .iter()
        .map(|(entity, ship)| ShipProbe {
            entity,
            id: ship.id,
            party: ship.party,
            source: ship.source,
            position: ship.position(),
        })
        .collect();
    probes.sort_by_key(|probe| probe.id);

    for probe in &probes {
        if !probe.position.is_finite() {
            warn!(ship = probe.id.0, "skipping collision test for ship off the map");
            continue;
        }

        for &planet_entity in planet_entities {
            let mut planet = match world.get::<&mut Planet>(planet_entity) {
                Ok(planet) => planet,
                Err(_) => {
                    warn!(?planet_entity, "planet entity missing from world");
                    continue;
                }
            };

            if planet.id == probe.source || !planet.detects_collision(&probe.position) {
                continue;
            }

            let outcome = planet.collide(probe.party, energy_cap);
            events.push(outcome_event(probe, &planet, outcome));
            despawn_buffer.push(probe.entity);
            break;
        }
    }
}

fn outcome_event(probe: &ShipProbe, planet: &Planet, outcome: CombatOutcome) -> SimEvent {
    match outcome {
        CombatOutcome::Reinforced { energy } => {
            debug!(ship = probe.id.0, planet = planet.id.0, energy, "reinforced");
            SimEvent::Reinforced {
                ship: probe.id,
                planet: planet.id,
                energy,
            }
        }
        CombatOutcome::Damaged { energy } => {
            debug!(ship = probe.id.0, planet = planet.id.0, energy, "damaged");
            SimEvent::Damaged {
                ship: probe.id,
                planet: planet.id,
                energy,
            }
        }
        CombatOutcome::Conquered { previous, .. } => {
            info!(
                planet = planet.id.0,
                previous = previous.0,
                party = planet.party.0,
                "planet conquered"
            );
            SimEvent::Conquered {
                ship: probe.id,
                planet: planet.id,
                previous,
                party: planet.party,
            }
        }
    }
}
