//! Keyboard bindings
//!
//! Key names are `KeyboardEvent.key` values. Each direction has two bindings
//! (arrow key and letter). Unbound keys are ignored.

use crate::sim::{Direction, PaddleCommand};

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the simulation
    Command(PaddleCommand),
    /// Flip idle/demo mode
    ToggleAutopilot,
    /// Flip audio mute
    ToggleMute,
}

/// Map a keydown to an action, `None` for unbound keys
pub fn map_key_down(key: &str) -> Option<KeyAction> {
    let action = match key {
        "ArrowLeft" | "a" => KeyAction::Command(PaddleCommand::Move(Direction::Left)),
        "ArrowRight" | "d" => KeyAction::Command(PaddleCommand::Move(Direction::Right)),
        " " => KeyAction::Command(PaddleCommand::Fire),
        "i" | "I" => KeyAction::ToggleAutopilot,
        "m" | "M" => KeyAction::ToggleMute,
        _ => return None,
    };
    Some(action)
}

/// Releasing any key halts the paddle
pub fn map_key_up(_key: &str) -> PaddleCommand {
    PaddleCommand::Stop
}
