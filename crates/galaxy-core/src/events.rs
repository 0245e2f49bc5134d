//! Events emitted by the simulation during a tick.

use serde::{Deserialize, Serialize};

use crate::components::{PlanetId, ShipId};
use crate::party::PartyId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A ship left `source` heading for `dest`.
    ShipLaunched {
        ship: ShipId,
        party: PartyId,
        source: PlanetId,
        dest: PlanetId,
    },
    /// A friendly ship landed.
    Reinforced {
        ship: ShipId,
        planet: PlanetId,
        energy: f32,
    },
    /// A hostile ship hit without taking the planet.
    Damaged {
        ship: ShipId,
        planet: PlanetId,
        energy: f32,
    },
    /// A hostile ship took the planet.
    Conquered {
        ship: ShipId,
        planet: PlanetId,
        previous: PartyId,
        party: PartyId,
    },
}
