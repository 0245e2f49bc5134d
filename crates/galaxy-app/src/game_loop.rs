//! Game loop thread. Runs the simulation engine at its tick rate and
//! publishes snapshots.
//!
//! The engine is moved into the thread and has no other owner. Commands
//! arrive via `mpsc` channel and are drained only between ticks. Each
//! snapshot is stored in shared state for polling, then a frame number is
//! offered on a bounded channel without waiting for the reader.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use galaxy_core::state::GameStateSnapshot;
use galaxy_sim::engine::SimulationEngine;

use crate::state::GameLoopCommand;

/// Pending frame signals kept for a slow renderer; the rest are dropped.
pub const FRAME_QUEUE_DEPTH: usize = 1;

/// Duration of one tick at `tick_rate` Hz.
pub fn tick_duration(tick_rate: f32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(tick_rate))
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender, the frame receiver, and the thread handle.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<(
    mpsc::Sender<GameLoopCommand>,
    mpsc::Receiver<u64>,
    JoinHandle<()>,
)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (frame_tx, frame_rx) = mpsc::sync_channel::<u64>(FRAME_QUEUE_DEPTH);

    let handle = std::thread::Builder::new()
        .name("galaxy-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot, frame_tx);
        })?;

    Ok((cmd_tx, frame_rx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    frame_tx: mpsc::SyncSender<u64>,
) {
    let tick_duration = tick_duration(engine.config().tick_rate);
    let mut next_tick_time = Instant::now();
    info!(?tick_duration, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Launch {
                    party,
                    from,
                    to,
                    reply,
                }) => {
                    let outcome = engine.launch(party, &from, to);
                    let _ = reply.send(outcome);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles the idle state internally)
        let snapshot = engine.tick();
        let frame = snapshot.time.tick;

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Signal the renderer; never wait for it
        if frame_tx.try_send(frame).is_err() {
            debug!(frame, "frame signal dropped");
        }

        // 5. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, reset instead of catching up
            next_tick_time = now;
        }
    }
}
