//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per display frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (block grid order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::{run_headless, steer};
pub use collision::{Rect, intersects};
pub use state::{
    Ball, BallState, Block, BlockField, Direction, GameEvent, GamePhase, GameState, Outcome,
    Paddle, PaddleCommand, SessionSummary, SideContact,
};
pub use tick::{TickInput, tick};
