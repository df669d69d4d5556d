//! Brick Breaker - a paddle-and-ball arcade game for the browser canvas
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, collisions, score, win/loss)
//! - `animation`: Ball sprite frame cycling, decoupled from physics
//! - `assets`: Sprite/sound manifest and browser preloading
//! - `audio`: Bump cue playback
//! - `platform`: Browser input mapping
//! - `renderer`: Draw list construction and canvas backend

pub mod animation;
pub mod assets;
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use animation::SpriteAnimation;
pub use assets::{AssetError, AssetManifest};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 360.0;

    /// Block grid
    pub const BLOCK_ROWS: usize = 4;
    pub const BLOCK_COLS: usize = 8;
    pub const BLOCK_WIDTH: f32 = 60.0;
    pub const BLOCK_HEIGHT: f32 = 20.0;
    /// Top-left corner of the first block
    pub const BLOCK_MARGIN_X: f32 = 60.0;
    pub const BLOCK_MARGIN_Y: f32 = 20.0;
    /// Distance between block origins
    pub const BLOCK_SPACING_X: f32 = 65.0;
    pub const BLOCK_SPACING_Y: f32 = 25.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    pub const BALL_SPEED: f32 = 3.0;
    pub const BALL_START_X: f32 = 320.0;
    pub const BALL_START_Y: f32 = 280.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    pub const PADDLE_SPEED: f32 = 6.0;
    pub const PADDLE_START_X: f32 = 280.0;
    pub const PADDLE_START_Y: f32 = 300.0;
    /// Horizontal offset of a docked ball from the paddle's left edge
    pub const DOCK_OFFSET: f32 = 40.0;

    /// Paddle deflection per pixel of contact offset from paddle center
    pub const DEFLECTION_FACTOR: f32 = 0.02;

    /// Ball sprite animation
    pub const BALL_ANIMATION_FRAMES: u8 = 4;
    pub const BALL_ANIMATION_INTERVAL_MS: u32 = 100;

    /// Give up on a resource that has not become ready after this long
    pub const ASSET_LOAD_TIMEOUT_MS: u32 = 10_000;

    /// Canvas presentation
    pub const CANVAS_ID: &str = "mycanvas";
    pub const TEXT_FILL: &str = "#ffffff";
    pub const TEXT_FONT: &str = "20px Arial";
    pub const SCORE_TEXT_X: f32 = 15.0;
    pub const SCORE_TEXT_Y: f32 = 20.0;
}
