//! Simulation constants and tuning parameters.

/// Default simulation tick rate (Hz).
pub const DEFAULT_TICK_RATE: f32 = 10.0;
/// Slowest accepted tick rate; one tick per 100 seconds.
pub const MIN_TICK_RATE: f32 = 0.01;

// --- Playfield ---

/// Default playfield width.
pub const FIELD_WIDTH: f32 = 320.0;

/// Default playfield height.
pub const FIELD_HEIGHT: f32 = 400.0;

/// Inset from the playfield edge inside which planets are placed.
pub const FIELD_BORDER: f32 = 30.0;

// --- Planets ---

/// Number of planets placed at startup.
pub const PLANET_COUNT: usize = 6;

/// Energy units gained per second by every planet.
pub const PLANET_GROWTH_RATE: f32 = 5.0;

/// Energy a planet holds when the simulation starts.
pub const PLANET_INITIAL_ENERGY: f32 = 0.0;

/// Extra gap kept between planet rims during placement.
pub const PLANET_SEPARATION_MARGIN: f32 = 10.0;

/// Planet radii and their cumulative probability thresholds.
/// 20 (60%), 25 (30%), 30 (10%).
pub const PLANET_SIZES: [(f32, f32); 3] = [(0.6, 20.0), (0.9, 25.0), (1.0, 30.0)];

/// Placement retries per planet before setup gives up.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Radius added to a planet's size when hit-testing a touch point.
pub const PLANET_HIT_MARGIN: f32 = 30.0;

// --- Combat ---

/// Energy moved by one arriving ship.
pub const SHIP_ENERGY: f32 = 1.0;

/// A hostile hit that leaves energy below this flips ownership.
pub const CONQUEST_THRESHOLD: f32 = 0.0;

/// Energy of a planet right after it changes owner.
pub const CONQUEST_RESET_ENERGY: f32 = 1.0;

// --- Ships ---

/// Speed handed to every ship. Path following does not use it.
pub const SHIP_SPEED: f32 = 20.0;

/// Minimum number of samples on a ship path (inclusive).
pub const PATH_SAMPLES_MIN: usize = 100;

/// Maximum number of samples on a ship path (exclusive).
pub const PATH_SAMPLES_MAX: usize = 150;

// --- Parties ---

pub const PLAYER_COLOR: u32 = 0xff00_a000;
pub const COMPUTER_COLOR: u32 = 0xffa0_0000;
pub const NEUTRAL_COLOR: u32 = 0xffa0_a0a0;
