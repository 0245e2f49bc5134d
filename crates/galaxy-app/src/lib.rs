//! Galaxy runtime shell.
//!
//! Runs the simulation engine on a dedicated fixed-rate thread and exposes
//! the command and snapshot API used by input and rendering collaborators.

pub mod game_loop;
pub mod ipc;
pub mod state;

pub use galaxy_core as core;
