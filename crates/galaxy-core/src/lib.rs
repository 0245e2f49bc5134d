//! Core types and definitions for the Galaxy simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry, parties, components, commands, state snapshots, events,
//! errors and constants. It has no dependency on threads or the ECS.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod party;
pub mod state;
pub mod types;
