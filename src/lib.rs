//! Hungry Critter - a small arena arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, difficulty ramp)
//! - `ui`: Screen handlers (title, how-to, playing) and buttons
//! - `app`: Fixed-rate game loop and screen state machine
//! - `renderer`: Rendering collaborator trait and terminal back-end
//! - `platform`: Input and clock collaborators (terminal, headless)
//! - `audio`: Fire-and-forget sound effect triggers
//! - `score`: Current/last/high score tracking
//! - `settings`: Data-driven game configuration

pub mod app;
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, AppError, FrameOutcome};
pub use score::ScoreState;
pub use settings::{Settings, SettingsError};
pub use ui::ScreenMode;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 800.0;

    /// Target frame rate of the game loop
    pub const TARGET_FPS: u32 = 60;

    /// Player movement per tick along each axis
    pub const PLAYER_VELOCITY: f32 = 7.0;
    /// Player sprite edge length
    pub const PLAYER_SIZE: f32 = 64.0;
    /// Player spawns at least this far from every wall
    pub const PLAYER_SPAWN_MARGIN: f32 = 100.0;
    /// Ticks of movement before the walk animation advances a frame
    pub const WALK_COOLDOWN_TICKS: u32 = 12;
    /// Frames in each walk cycle
    pub const WALK_FRAMES: u8 = 2;

    /// Collectible and projectile sprite edge length
    pub const ITEM_SIZE: f32 = 60.0;
    /// Spawn coordinates along an axis stay within [margin, dim - margin]
    pub const SPAWN_MARGIN: f32 = 32.0;

    /// Projectile speed at the start of every run (pixels per tick)
    pub const INITIAL_PROJECTILE_SPEED: f32 = 7.0;
    /// Speed added on each ramp firing
    pub const SPEED_INCREMENT: f32 = 0.5;
    /// Seconds of play between ramp firings
    pub const RAMP_INTERVAL_SECS: f32 = 1.0;
    /// Projectiles in play per run
    pub const PROJECTILE_COUNT: usize = 1;

    /// Pause after a catch before the caught pose is shown (seconds)
    pub const CATCH_REGISTER_SECS: f32 = 1.0;
    /// How long the caught screen is held before returning to the title (seconds)
    pub const CATCH_HOLD_SECS: f32 = 3.0;
}
