//! ECS components for hecs entities.
//!
//! Components are plain data with the per-entity rules of the game
//! (growth, hit test, combat, path following). Systems decide when the
//! rules run and in which order.

use serde::{Deserialize, Serialize};

use crate::constants::{CONQUEST_RESET_ENERGY, CONQUEST_THRESHOLD, SHIP_ENERGY};
use crate::enums::CombatOutcome;
use crate::party::PartyId;
use crate::types::Vector;

/// Index of a planet in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanetId(pub u32);

/// Sequential ship number, assigned at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// A stationary planet. Never despawned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    /// Current owner.
    pub party: PartyId,
    pub position: Vector,
    /// Collision radius.
    pub size: f32,
    /// Always `>= 0`.
    pub energy: f32,
    /// Energy units per second.
    pub growth_rate: f32,
}

/// A ship following a precomputed path between two planets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub party: PartyId,
    pub source: PlanetId,
    pub dest: PlanetId,
    /// Inner Bezier control points `sp1`, `sp2`.
    pub control_points: [Vector; 2],
    pub path: Vec<Vector>,
    /// Cursor into `path`; never decreases, never passes the last point.
    pub path_index: usize,
    pub speed: f32,
}

impl Planet {
    /// Accrue `growth_rate * dt` energy, capped at `cap` when one is set.
    pub fn grow(&mut self, dt: f32, cap: Option<f32>) {
        let grown = self.energy + self.growth_rate * dt;
        self.energy = match cap {
            Some(cap) => grown.min(cap),
            None => grown,
        };
    }

    /// Whether a point lies strictly inside this planet.
    pub fn detects_collision(&self, point: &Vector) -> bool {
        self.position.distance_to(point) < self.size
    }

    /// Resolve the arrival of one ship owned by `ship_party`.
    pub fn collide(&mut self, ship_party: PartyId, cap: Option<f32>) -> CombatOutcome {
        if ship_party == self.party {
            let reinforced = self.energy + SHIP_ENERGY;
            self.energy = match cap {
                Some(cap) => reinforced.min(cap),
                None => reinforced,
            };
            return CombatOutcome::Reinforced {
                energy: self.energy,
            };
        }

        let remaining = self.energy - SHIP_ENERGY;
        if remaining < CONQUEST_THRESHOLD {
            let previous = self.party;
            self.party = ship_party;
            self.energy = CONQUEST_RESET_ENERGY;
            CombatOutcome::Conquered {
                previous,
                energy: self.energy,
            }
        } else {
            self.energy = remaining;
            CombatOutcome::Damaged {
                energy: self.energy,
            }
        }
    }
}

impl Ship {
    /// Current position on the path.
    pub fn position(&self) -> Vector {
        self.path
            .get(self.path_index)
            .copied()
            .unwrap_or_default()
    }

    /// Step one point along the path. Parks on the last point.
    pub fn advance(&mut self) {
        if self.path_index + 1 < self.path.len() {
            self.path_index += 1;
        }
    }

    /// Whether the ship sits on the final point of its path.
    pub fn has_arrived(&self) -> bool {
        self.path_index + 1 >= self.path.len()
    }
}
