//! Letter Invaders - a letter-matching space invaders simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world state, collisions, transition pipeline)
//! - `driver`: Fixed-interval frame driver, input sources and HUD rendering
//! - `settings`: Driver settings (pacing, autopilot)
//! - `highscores`: In-memory session leaderboard

pub mod driver;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation tick interval (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 16;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_START: Vec2 = Vec2::new((PLAY_WIDTH - PLAYER_WIDTH) / 2.0, 540.0);

    /// Alien grid
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIEN_COLS: usize = 10;
    pub const ALIEN_WIDTH: f32 = 24.0;
    pub const ALIEN_HEIGHT: f32 = 20.0;
    /// Top-left of the grid's first alien
    pub const ALIEN_ORIGIN: Vec2 = Vec2::new(40.0, 40.0);
    /// Distance between neighbouring alien origins (column, row)
    pub const ALIEN_SPACING: Vec2 = Vec2::new(40.0, 32.0);
    pub const ALIEN_START_VEL: Vec2 = Vec2::new(1.0, 0.0);
    /// Added to the absolute alien velocity on every level-up
    pub const ALIEN_VEL_INCREMENT: Vec2 = Vec2::new(0.5, 0.0);
    /// Vertical drop applied when the grid bounces off a wall
    pub const ALIEN_DROP: f32 = 16.0;
    /// Per-alien, per-tick chance of firing
    pub const ALIEN_SHOOT_PROBABILITY: f64 = 0.0005;

    /// Bullets (drawn as a single letter)
    pub const BULLET_WIDTH: f32 = 12.0;
    pub const BULLET_HEIGHT: f32 = 16.0;
    pub const PLAYER_BULLET_VEL: Vec2 = Vec2::new(0.0, -8.0);
    pub const ALIEN_BULLET_VEL: Vec2 = Vec2::new(0.0, 4.0);

    /// Shields
    pub const SHIELD_COUNT: usize = 4;
    pub const SHIELD_WIDTH: f32 = 64.0;
    pub const SHIELD_HEIGHT: f32 = 24.0;
    pub const SHIELD_GAP: f32 = 96.0;
    pub const SHIELD_Y: f32 = 460.0;
    /// Height lost (and, for hits from below, vertical shift) per bullet hit
    pub const SHIELD_EROSION: f32 = 4.0;

    /// Scoring
    pub const SHOOT_PENALTY: i64 = 1;
    pub const KILL_BONUS: i64 = 5;
    pub const KILL_MATCH_BONUS: i64 = 20;

    /// Ammo
    pub const AMMO_MAX: u32 = 10;
    pub const AMMO_REGEN: u32 = 1;
    /// Ticks between ammo regeneration
    pub const AMMO_REGEN_PERIOD: u32 = 30;

    /// Key symbol that starts (or restarts) a run
    pub const START_KEY: &str = "Enter";
    /// Letters used for aliens and bullets
    pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    pub const START_MESSAGE: &str = "Press Enter to start";
}
