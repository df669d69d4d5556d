//! Ball sprite animation
//!
//! Cycles the ball's sprite column on its own clock. The simulation never
//! reads the frame index; the renderer picks it up when drawing.

use crate::consts::BALL_ANIMATION_FRAMES;

#[derive(Debug, Clone, Default)]
pub struct SpriteAnimation {
    frame: u8,
    running: bool,
}

impl SpriteAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin cycling. Frames only advance once started.
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Step to the next frame, wrapping to 0
    pub fn advance(&mut self) {
        if !self.running {
            return;
        }
        self.frame = (self.frame + 1) % BALL_ANIMATION_FRAMES;
    }

    /// Left edge of the current frame in a horizontal sprite strip
    pub fn source_x(&self, frame_width: f32) -> f32 {
        self.frame as f32 * frame_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut anim = SpriteAnimation::new();
        anim.advance();
        anim.advance();
        assert_eq!(anim.source_x(20.0), 0.0);
        assert!(!anim.is_running());
    }

    #[test]
    fn test_frames_wrap() {
        let mut anim = SpriteAnimation::new();
        anim.start();
        let columns: Vec<f32> = (0..6)
            .map(|_| {
                anim.advance();
                anim.source_x(20.0)
            })
            .collect();
        assert_eq!(columns, vec![20.0, 40.0, 60.0, 0.0, 20.0, 40.0]);
    }
}
