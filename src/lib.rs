//! Brick Jumper - A side-scrolling endless jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (platform stream, jump physics, landing, resets)
//! - `config`: Data-driven run constants
//! - `records`: Longest-run leaderboard
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod records;
pub mod sim;

pub use config::SimConfig;
pub use error::ConfigError;
pub use records::RunRecords;
pub use sim::Session;

/// Game configuration constants
pub mod consts {
    /// Host frame rate the per-tick kinematics are tuned for
    pub const TICK_HZ: f64 = 60.0;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 1024.0;
    pub const VIEWPORT_HEIGHT: f32 = 768.0;

    /// Actor display size (square sprite)
    pub const ACTOR_SIZE: f32 = 100.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH_FACTOR: f32 = 1.1;
    pub const PLATFORM_HEIGHT: f32 = 32.0;
    pub const PLATFORM_MIN_Y: f32 = 300.0;
    pub const PLATFORM_BOTTOM_MARGIN: f32 = 10.0;
    pub const PLATFORM_START_Y: f32 = 600.0;
    pub const PLATFORM_Y_STEP_FACTOR: f32 = 0.7;
    pub const GAP_MIN_FACTOR: f32 = 1.0;
    pub const GAP_MAX_FACTOR: f32 = 1.5;

    /// Jump launch velocity (pixels/tick, negative is up)
    pub const JUMP_VELOCITY: f32 = -18.0;
    /// Jump arc gravity (pixels/tick²)
    pub const GRAVITY: f32 = 1.2;
    /// Fall step when unsupported and not jumping (pixels/tick)
    pub const FAST_FALL: f32 = 8.5;
    /// Platform scroll speed (pixels/tick)
    pub const SCROLL_SPEED: f32 = 2.0;
    /// Speed used to size the platform set
    pub const NOMINAL_SPEED: f32 = 4.0;

    /// Nominal gap caps used for sizing
    pub const NOMINAL_GAP_ACTOR_FACTOR: f32 = 1.5;
    pub const NOMINAL_GAP_JUMP_FACTOR: f32 = 0.75;
    /// Extra platforms beyond the visible span
    pub const PLATFORM_MARGIN: usize = 2;

    /// Stopwatch restart delay after a reset
    pub const RESET_DELAY_MS: u64 = 1000;

    pub const DEFAULT_SEED: u64 = 0x5eed_b41c;
}
