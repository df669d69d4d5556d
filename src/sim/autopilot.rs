//! Idle/demo mode
//!
//! A simple paddle controller: launch when docked, then chase the ball.

use super::state::{Direction, GameState, PaddleCommand, SessionSummary};
use super::tick::{TickInput, tick};

/// Steps to look ahead when predicting where the ball will be
const LEAD_STEPS: f32 = 4.0;

/// Pick the command the autopilot would issue this step
pub fn steer(state: &GameState) -> PaddleCommand {
    if state.ball.is_docked() {
        return PaddleCommand::Fire;
    }

    let ball_center = state.ball.rect().center_x() + state.ball.vel.x * LEAD_STEPS;
    let paddle_center = state.paddle.rect().center_x();
    let delta = ball_center - paddle_center;

    // One paddle step of slack avoids jittering around the target
    if delta > state.paddle.speed {
        PaddleCommand::Move(Direction::Right)
    } else if delta < -state.paddle.speed {
        PaddleCommand::Move(Direction::Left)
    } else {
        PaddleCommand::Stop
    }
}

/// Play a whole session with the autopilot, up to `max_frames` steps
pub fn run_headless(seed: u64, max_frames: u64) -> SessionSummary {
    let mut state = GameState::new(seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    log::info!("Headless session starting with seed: {}", seed);
    while state.is_running() && state.time_ticks < max_frames {
        tick(&mut state, &input);
    }
    if state.is_running() {
        log::warn!("Headless session stopped after {} frames", max_frames);
    }

    state.summary()
}
