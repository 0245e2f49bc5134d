//! Game state snapshot: the complete visible state handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::components::{PlanetId, ShipId};
use crate::enums::ClockState;
use crate::errors::LaunchError;
use crate::events::SimEvent;
use crate::party::{Party, PartyId};
use crate::types::{SimTime, Vector};

/// Point-in-time state of the whole simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub clock: ClockState,
    pub parties: Vec<Party>,
    /// Sorted by planet id.
    pub planets: Vec<PlanetView>,
    /// Sorted by ship id.
    pub ships: Vec<ShipView>,
    /// Events produced since the previous tick.
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetView {
    pub id: PlanetId,
    pub party: PartyId,
    pub position: Vector,
    pub size: f32,
    pub energy: f32,
    pub growth_rate: f32,
    /// Part of the current drag selection.
    pub selected: bool,
    /// Current drop target.
    pub targeted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub id: ShipId,
    pub party: PartyId,
    pub source: PlanetId,
    pub dest: PlanetId,
    pub position: Vector,
    pub control_points: [Vector; 2],
    pub path_index: usize,
    pub path_len: usize,
}

/// A source planet that was refused during a launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchRejection {
    pub planet: PlanetId,
    pub reason: LaunchError,
}

/// Ships created by one launch request and the sources that were refused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOutcome {
    pub launched: Vec<ShipView>,
    pub rejected: Vec<LaunchRejection>,
}

impl GameStateSnapshot {
    pub fn planet(&self, id: PlanetId) -> Option<&PlanetView> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn ship(&self, id: ShipId) -> Option<&ShipView> {
        self.ships.iter().find(|s| s.id == id)
    }
}
