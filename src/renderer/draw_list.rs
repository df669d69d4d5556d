//! Draw list generation
//!
//! Turns a session snapshot into an ordered list of canvas operations. Kept
//! free of browser types so the frame layout can be checked natively.

use crate::animation::SpriteAnimation;
use crate::assets::SpriteId;
use crate::consts::{SCORE_TEXT_X, SCORE_TEXT_Y};
use crate::sim::{GameState, Rect};

/// One canvas operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole field
    Clear { width: f32, height: f32 },
    /// Draw a sprite at its natural size
    Image { sprite: SpriteId, x: f32, y: f32 },
    /// Draw the `src` region of a sprite into `dst`
    SubImage {
        sprite: SpriteId,
        src: Rect,
        dst: Rect,
    },
    /// Filled text with the baseline at `y`
    Text { text: String, x: f32, y: f32 },
}

/// Build the frame for `state`, drawing the ball at the current `animation` frame
pub fn build_frame(state: &GameState, animation: &SpriteAnimation) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(state.total_blocks() + 5);

    commands.push(DrawCommand::Clear {
        width: state.field.x,
        height: state.field.y,
    });
    commands.push(DrawCommand::Image {
        sprite: SpriteId::Background,
        x: 0.0,
        y: 0.0,
    });

    let ball = &state.ball;
    commands.push(DrawCommand::SubImage {
        sprite: SpriteId::Ball,
        src: Rect::new(
            animation.source_x(ball.size.x),
            0.0,
            ball.size.x,
            ball.size.y,
        ),
        dst: ball.rect(),
    });

    commands.push(DrawCommand::Image {
        sprite: SpriteId::Platform,
        x: state.paddle.pos.x,
        y: state.paddle.pos.y,
    });

    commands.extend(
        state
            .blocks
            .iter()
            .filter(|b| b.active)
            .map(|b| DrawCommand::SubImage {
                sprite: SpriteId::Block,
                src: Rect::new(0.0, 0.0, b.rect.width, b.rect.height),
                dst: b.rect,
            }),
    );

    commands.push(DrawCommand::Text {
        text: format!("Score: {}", state.score),
        x: SCORE_TEXT_X,
        y: SCORE_TEXT_Y,
    });

    commands
}
