//! Simulation engine for Galaxy.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the renderer.

pub mod config;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use config::SimConfig;
pub use engine::SimulationEngine;
pub use galaxy_core as core;

#[cfg(test)]
mod tests;
