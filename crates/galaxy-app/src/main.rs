//! Headless Galaxy runner.
//!
//! Usage: `galaxy [config.json] [seconds]`
//!
//! Starts the simulation, has the player send a ship from its home planet
//! to the computer's home every second, and logs the state of the map.

use tracing::info;
use tracing_subscriber::EnvFilter;

use galaxy_app::game_loop::tick_duration;
use galaxy_app::ipc;
use galaxy_app::state::AppState;
use galaxy_core::commands::PlayerCommand;
use galaxy_core::components::PlanetId;
use galaxy_core::party::{PartyId, PartyRegistry};
use galaxy_sim::SimConfig;

const DEFAULT_RUN_SECONDS: u64 = 30;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let run_seconds = match args.next() {
        Some(seconds) => seconds.parse()?,
        None => DEFAULT_RUN_SECONDS,
    };

    let parties = PartyRegistry::new(&config.parties);
    let ticks_per_second = config.tick_rate.round().max(1.0) as u64;
    let tick_period = tick_duration(config.tick_rate);

    let state = AppState::new();
    let frames = ipc::start_simulation(&state, config)?;
    ipc::send_command(&state, PlayerCommand::Start)?;

    let last_frame = run_seconds * ticks_per_second;
    let mut frame = 0;
    let mut last_second = 0;
    while frame < last_frame {
        frame = frames.recv_timeout(tick_period * 10)?;
        // Frames may be dropped while this thread is busy.
        let second = frame / ticks_per_second;
        if second == last_second {
            continue;
        }
        last_second = second;

        ipc::launch(&state, parties.player(), vec![PlanetId(0)], PlanetId(1))?;

        if let Some(snapshot) = ipc::get_snapshot(&state)? {
            let owned = |party: PartyId| {
                snapshot
                    .planets
                    .iter()
                    .filter(|p| p.party == party)
                    .count()
            };
            info!(
                seconds = snapshot.time.elapsed_secs,
                ships = snapshot.ships.len(),
                player_planets = owned(parties.player()),
                computer_planets = owned(parties.computer()),
                "status"
            );
        }
    }

    ipc::stop_simulation(&state)?;
    Ok(())
}
