//! Per-frame simulation step
//!
//! One call advances the session by exactly one display frame. There is no
//! delta time: speeds are pixels per frame, so gameplay runs at whatever rate
//! the host's frame scheduler provides.

use super::autopilot;
use super::state::{GameEvent, GameState, Outcome, PaddleCommand};

/// Input collected since the previous step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player commands in arrival order
    pub commands: Vec<PaddleCommand>,
    /// Idle/demo mode - the autopilot steers the paddle
    pub idle_mode: bool,
}

impl TickInput {
    /// Input carrying a single command
    pub fn command(command: PaddleCommand) -> Self {
        Self {
            commands: vec![command],
            ..Default::default()
        }
    }
}

/// Advance the session by one step and report what happened.
///
/// Order within a step:
/// 1. paddle boundary check, then paddle move
/// 2. ball move
/// 3. ball against each active block in grid order
/// 4. ball against the paddle
/// 5. ball against the field edges
///
/// Collision checks in 3-5 look one step ahead of the position committed in
/// 2, so contacts register a frame early. Gameplay is tuned around that.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Terminal states are frozen
    if !state.is_running() {
        return events;
    }

    for &command in &input.commands {
        events.extend(state.apply_command(command));
    }
    if input.idle_mode {
        let command = autopilot::steer(state);
        events.extend(state.apply_command(command));
    }

    state.time_ticks += 1;

    state.paddle.check_bounds(state.field.x);
    state.paddle.advance(&mut state.ball);

    state.ball.advance();

    let total = state.total_blocks();
    let mut cleared = false;
    for (index, block) in state.blocks.iter_mut().enumerate() {
        if !block.active || !state.ball.collide(&block.rect) {
            continue;
        }
        state.ball.bump_block(block);
        state.score += 1;
        log::debug!("Block {} destroyed, score {}", index, state.score);
        events.push(GameEvent::BlockDestroyed { index });

        if state.score as usize == total {
            cleared = true;
            break;
        }
    }

    // A win ends the step; nothing later in it may turn it into a loss
    if cleared {
        events.push(state.end(Outcome::Win));
        state.check_invariants();
        return events;
    }

    if state.ball.collide(&state.paddle.rect()) && state.ball.bump_platform(&state.paddle) {
        events.push(GameEvent::PaddleBounce);
    }

    let contact = state.ball.bump_sides(state.field);
    if contact.wall {
        events.push(GameEvent::WallBounce);
    }
    if contact.ceiling {
        events.push(GameEvent::CeilingBounce);
    }
    if contact.fell {
        events.push(state.end(Outcome::Loss));
    }

    state.check_invariants();
    events
}
