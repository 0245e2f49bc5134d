//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::components::PlanetId;
use crate::party::PartyId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Simulation control ---
    /// Start ticking. Ignored once running.
    Start,

    // --- Fleet orders ---
    /// Launch one ship from each of `from` toward `to`.
    Launch {
        party: PartyId,
        from: Vec<PlanetId>,
        to: PlanetId,
    },

    // --- Drag selection ---
    /// Add a planet owned by `party` to the launch selection.
    SelectSource { party: PartyId, planet: PlanetId },
    /// Set or clear the highlighted drop target.
    SetTarget { planet: Option<PlanetId> },
    /// Launch from every selected planet toward `to`, then clear the selection.
    LaunchSelection { party: PartyId, to: PlanetId },
    /// Drop the selection and the target.
    ClearSelection,
}
