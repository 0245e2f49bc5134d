//! Error types shared by the simulation crates.

use thiserror::Error;

use crate::components::PlanetId;

/// Reason a single source planet could not launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("planet {0:?} does not exist")]
    UnknownPlanet(PlanetId),
    #[error("planet {0:?} cannot launch at itself")]
    SameSourceAndDestination(PlanetId),
    #[error("planet {0:?} is not owned by the commanding party")]
    NotOwner(PlanetId),
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to build the initial world.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no free spot for planet {index} after {attempts} attempts")]
    PlacementExhausted { index: usize, attempts: u32 },
    #[error("planet {index} in layout is invalid: {reason}")]
    InvalidLayout { index: usize, reason: &'static str },
}
