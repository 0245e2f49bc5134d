//! Command and query handlers for collaborators (input layer, renderer).
//!
//! They bridge requests to the game loop thread via channels and never
//! touch the simulation world directly.

use std::sync::mpsc;

use galaxy_core::commands::PlayerCommand;
use galaxy_core::components::PlanetId;
use galaxy_core::party::PartyId;
use galaxy_core::state::{GameStateSnapshot, LaunchOutcome};
use galaxy_sim::{SimConfig, SimulationEngine};

use crate::game_loop;
use crate::state::{AppError, AppState, GameLoopCommand};

/// Build the world and start the game loop thread.
///
/// Returns the frame receiver: one tick number per published snapshot,
/// dropped when the reader lags.
pub fn start_simulation(
    state: &AppState,
    config: SimConfig,
) -> Result<mpsc::Receiver<u64>, AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::LockPoisoned)?;

    if *running {
        return Err(AppError::AlreadyRunning);
    }

    let engine = SimulationEngine::new(config)?;
    let (cmd_tx, frame_rx, handle) =
        game_loop::spawn_game_loop(engine, state.latest_snapshot.clone())?;

    *state.command_tx.lock().map_err(|_| AppError::LockPoisoned)? = Some(cmd_tx);
    *state.loop_thread.lock().map_err(|_| AppError::LockPoisoned)? = Some(handle);
    *running = true;

    Ok(frame_rx)
}

/// Queue a player command for the next tick.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    send(state, GameLoopCommand::PlayerCommand(command))
}

/// Launch from `from` toward `to` and wait for the ships to be created.
pub fn launch(
    state: &AppState,
    party: PartyId,
    from: Vec<PlanetId>,
    to: PlanetId,
) -> Result<LaunchOutcome, AppError> {
    let (reply_tx, reply_rx) = mpsc::channel();
    send(
        state,
        GameLoopCommand::Launch {
            party,
            from,
            to,
            reply: reply_tx,
        },
    )?;
    reply_rx.recv().map_err(|_| AppError::Disconnected)
}

/// Get the latest published snapshot.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, AppError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| AppError::LockPoisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop after its current tick and wait for the thread.
pub fn stop_simulation(state: &AppState) -> Result<(), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::LockPoisoned)?;
    if !*running {
        return Err(AppError::NotStarted);
    }

    if let Some(tx) = state
        .command_tx
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take()
    {
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    let handle = state
        .loop_thread
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take();
    if let Some(handle) = handle {
        handle.join().map_err(|_| AppError::Disconnected)?;
    }

    *running = false;
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;

    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| AppError::Disconnected),
        None => Err(AppError::NotStarted),
    }
}
