//! Trac Flappy - flap through pipes, collect coins, spend them on upgrades
//!
//! Core modules:
//! - `sim`: Round simulation (bird physics, pipe spawning, collisions, coins)
//! - `session`: Lives, round lifecycle and game-over state machine
//! - `economy`: Skins, multiplier tiers, extra-life ladder and purchases
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `renderer`: Scene description and 2D canvas painter
//! - `platform`: Input mapping and frame timing

pub mod economy;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod profile;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod ui;
pub mod wallet;

pub use economy::{EconomyConfig, Ledger, PurchaseError, Skin};
pub use leaderboard::Leaderboard;
pub use profile::Profile;
pub use session::{Session, Status};

/// Game configuration constants
pub mod consts {
    /// Logical play field size (canvas is scaled to fit)
    pub const BASE_WIDTH: f32 = 720.0;
    pub const BASE_HEIGHT: f32 = 500.0;
    /// Height of the ground strip at the bottom of the field
    pub const GROUND_HEIGHT: f32 = 58.0;
    /// Y coordinate the bird must never reach
    pub const GROUND_Y: f32 = BASE_HEIGHT - GROUND_HEIGHT;

    /// Every frame delta is scaled by this before physics
    pub const GAME_SPEED_SCALE: f32 = 0.3;
    /// Frame deltas are normalized to this rate (1.0 = one frame)
    pub const NOMINAL_FPS: f64 = 60.0;
    pub const MIN_DELTA: f32 = 0.5;
    pub const MAX_DELTA: f32 = 2.0;

    /// Bird defaults
    pub const BIRD_START_X: f32 = BASE_WIDTH * 0.18;
    pub const BIRD_START_Y: f32 = BASE_HEIGHT * 0.46;
    pub const BIRD_RADIUS: f32 = 20.0;
    pub const GRAVITY: f32 = 0.41;
    /// Velocity set by a flap (negative is up)
    pub const FLAP_STRENGTH: f32 = -2.3;
    /// Position integration factor
    pub const BIRD_MOVE_FACTOR: f32 = 14.0;

    /// Horizontal speed: base + min(score * gain, cap), then scaled
    pub const BASE_SPEED: f32 = 2.6;
    pub const SPEED_GAIN_PER_POINT: f32 = 0.02;
    pub const SPEED_GAIN_CAP: f32 = 3.4;
    /// Pipe scroll distance factor
    pub const SCROLL_FACTOR: f32 = 16.0;
    /// Spawn accumulator gain factor
    pub const SPAWN_RATE: f32 = 12.0;
    /// Spacing threshold: base - score * shrink, clamped
    pub const SPACING_BASE: f32 = 115.0;
    pub const SPACING_SHRINK_PER_POINT: f32 = 0.4;
    pub const SPACING_MIN: f32 = 70.0;
    pub const SPACING_MAX: f32 = 110.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 74.0;
    pub const PIPE_SPAWN_X: f32 = BASE_WIDTH + PIPE_WIDTH;
    pub const GAP_MIN: f32 = 140.0;
    pub const GAP_RANGE: f32 = 40.0;
    /// Gaps never start above this
    pub const GAP_TOP_MARGIN: f32 = 40.0;
    /// Vertical room reserved below the lowest possible gap
    pub const GAP_BOTTOM_RESERVE: f32 = 120.0;
    /// Entities whose trailing edge is left of this are culled
    pub const CULL_MARGIN: f32 = -40.0;

    /// Coin defaults
    pub const COIN_RADIUS: f32 = 10.0;
    pub const COIN_JITTER: f32 = 40.0;
    /// Pipes between coins, drawn uniformly from this inclusive range
    pub const PIPES_PER_COIN_MIN: u32 = 3;
    pub const PIPES_PER_COIN_MAX: u32 = 5;
}
