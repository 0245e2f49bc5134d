//! Startup configuration for a simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use galaxy_core::constants::*;
use galaxy_core::errors::ConfigError;
use galaxy_core::party::PartiesConfig;

/// Playfield rectangle. Planets are placed inside it, inset by `border`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
    pub border: f32,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            border: FIELD_BORDER,
        }
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Ticks per second.
    pub tick_rate: f32,
    pub field: FieldBounds,
    pub planet_count: usize,
    /// Energy per second, shared by every planet.
    pub growth_rate: f32,
    pub initial_energy: f32,
    /// Upper bound on planet energy. `None` leaves growth unbounded.
    pub energy_cap: Option<f32>,
    /// Gap kept between planet rims during placement.
    pub separation_margin: f32,
    pub ship_speed: f32,
    /// Path sample count range, `[min, max)`.
    pub path_samples_min: usize,
    pub path_samples_max: usize,
    /// Slack around a planet for touch hit-testing.
    pub hit_margin: f32,
    pub parties: PartiesConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: DEFAULT_TICK_RATE,
            field: FieldBounds::default(),
            planet_count: PLANET_COUNT,
            growth_rate: PLANET_GROWTH_RATE,
            initial_energy: PLANET_INITIAL_ENERGY,
            energy_cap: None,
            separation_margin: PLANET_SEPARATION_MARGIN,
            ship_speed: SHIP_SPEED,
            path_samples_min: PATH_SAMPLES_MIN,
            path_samples_max: PATH_SAMPLES_MAX,
            hit_margin: PLANET_HIT_MARGIN,
            parties: PartiesConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate.is_finite() && self.tick_rate >= MIN_TICK_RATE) {
            return Err(ConfigError::Invalid("tick_rate must be at least 0.01"));
        }
        if self.planet_count < 2 {
            return Err(ConfigError::Invalid(
                "planet_count must leave room for both home planets",
            ));
        }
        let inner_width = self.field.width - 2.0 * self.field.border;
        let inner_height = self.field.height - 2.0 * self.field.border;
        if !(inner_width > 0.0 && inner_height > 0.0) {
            return Err(ConfigError::Invalid("border leaves no room for planets"));
        }
        if !(self.growth_rate.is_finite() && self.growth_rate >= 0.0) {
            return Err(ConfigError::Invalid("growth_rate must be non-negative"));
        }
        if !(self.initial_energy.is_finite() && self.initial_energy >= 0.0) {
            return Err(ConfigError::Invalid("initial_energy must be non-negative"));
        }
        if let Some(cap) = self.energy_cap {
            if !(cap >= self.initial_energy) {
                return Err(ConfigError::Invalid("energy_cap is below initial_energy"));
            }
        }
        if self.separation_margin < 0.0 {
            return Err(ConfigError::Invalid("separation_margin must be non-negative"));
        }
        if self.path_samples_min < 2 || self.path_samples_max <= self.path_samples_min {
            return Err(ConfigError::Invalid(
                "path samples must satisfy 2 <= min < max",
            ));
        }
        Ok(())
    }
}
