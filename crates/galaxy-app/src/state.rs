//! Application state shared between collaborators and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use galaxy_core::commands::PlayerCommand;
use galaxy_core::components::PlanetId;
use galaxy_core::errors::SetupError;
use galaxy_core::party::PartyId;
use galaxy_core::state::{GameStateSnapshot, LaunchOutcome};

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to queue for the next tick.
    PlayerCommand(PlayerCommand),
    /// Launch between ticks and report the result on `reply`.
    Launch {
        party: PartyId,
        from: Vec<PlanetId>,
        to: PlanetId,
        reply: mpsc::Sender<LaunchOutcome>,
    },
    /// Stop scheduling ticks and end the thread.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop is gone")]
    Disconnected,
    #[error("shared state lock poisoned")]
    LockPoisoned,
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in a `Mutex` so the state is `Sync`
/// - `Mutex<Option<...>>` holds values that exist only while running
/// - the latest snapshot is an `Arc<Mutex<...>>` shared with the loop thread
pub struct AppState {
    /// Channel to the game loop. `None` before `start_simulation`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest complete snapshot, replaced after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub loop_thread: Mutex<Option<JoinHandle<()>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_thread: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
