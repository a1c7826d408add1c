//! Driver Safety - a top-down arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, collisions, scoring, game state)
//! - `session`: Scene lifecycle and the presenter seam to a rendering engine
//! - `hud`: Presentation-facing snapshot of the simulation
//! - `platform`: Clock and input abstraction
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod hud;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::TuningError;
pub use hud::Hud;
pub use session::{LatestHud, Presenter, Scene, Session};
pub use tuning::Tuning;

/// Milliseconds on the game's monotonic clock
pub type Millis = u64;

/// Playfield geometry constants
pub mod consts {
    use glam::Vec2;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    pub const PLAYFIELD_CENTER: Vec2 = Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0);

    /// Region the player car may occupy (inclusive)
    pub const PLAYER_MIN: Vec2 = Vec2::new(50.0, 100.0);
    pub const PLAYER_MAX: Vec2 = Vec2::new(750.0, 550.0);
    /// Player position on scene start and on every restart
    pub const PLAYER_START: Vec2 = Vec2::new(400.0, 500.0);

    /// Every sprite is drawn at this scale around its centre
    pub const SPRITE_SCALE: f32 = 1.5;
    /// Unscaled sprite sizes
    pub const CAR_SIZE: Vec2 = Vec2::new(32.0, 56.0);
    pub const PEDESTRIAN_SIZE: Vec2 = Vec2::new(20.0, 32.0);
    pub const HAZARD_SIZE: Vec2 = Vec2::new(40.0, 40.0);

    /// Horizontal spawn/recycle lane range (inclusive)
    pub const SPAWN_X_MIN: i32 = 100;
    pub const SPAWN_X_MAX: i32 = 700;
    /// Initial spawn y range before stagger (inclusive)
    pub const SPAWN_Y_MIN: i32 = -200;
    pub const SPAWN_Y_MAX: i32 = -100;
    /// Entities below this y are recycled back above the playfield
    pub const RECYCLE_Y: f32 = 700.0;
    /// Recycled entities restart at this y, minus their stagger
    pub const RECYCLE_BASE_Y: f32 = -200.0;

    /// Scrolling advisory text spawn point and removal line
    pub const ADVISORY_ORIGIN: Vec2 = Vec2::new(400.0, -50.0);
    pub const ADVISORY_DESPAWN_Y: f32 = 650.0;

    /// Longest single frame fed to the simulation
    pub const MAX_FRAME_MS: u64 = 250;
}
