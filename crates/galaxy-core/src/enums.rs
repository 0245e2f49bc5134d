//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::party::PartyId;

/// Lifecycle of the simulation clock. There is no pause: once running,
/// the clock ticks until the loop is shut down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    #[default]
    Idle,
    Running,
}

/// Result of one ship arriving at a planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// Friendly ship added its energy to the planet.
    Reinforced { energy: f32 },
    /// Hostile ship drained energy without taking the planet.
    Damaged { energy: f32 },
    /// Hostile ship took the planet from `previous`.
    Conquered { previous: PartyId, energy: f32 },
}
