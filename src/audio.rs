//! Sound cues
//!
//! The game has a single "bump" clip, played for every bounce and every
//! destroyed block. Playback is fire-and-forget.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hit a block, the paddle, a wall or the ceiling
    Bump,
}

impl SoundEffect {
    /// The cue a simulation event should make, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BlockDestroyed { .. }
            | GameEvent::PaddleBounce
            | GameEvent::WallBounce
            | GameEvent::CeilingBounce => Some(SoundEffect::Bump),
            GameEvent::Launched | GameEvent::SessionEnded(_) => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlAudioElement;

    use super::SoundEffect;

    const CUE_VOLUME: f64 = 0.8;

    /// Plays preloaded clips through HTML media elements
    pub struct AudioManager {
        bump: HtmlAudioElement,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(bump: HtmlAudioElement) -> Self {
            Self { bump, muted: false }
        }

        pub fn toggle_muted(&mut self) -> bool {
            self.muted = !self.muted;
            self.muted
        }

        /// Start a clip and return immediately. Each cue plays on its own
        /// clone so overlapping cues layer instead of restarting each other.
        pub fn play(&self, effect: SoundEffect) {
            if self.muted {
                return;
            }

            let template = match effect {
                SoundEffect::Bump => &self.bump,
            };
            let clip = match template
                .clone_node()
                .ok()
                .and_then(|node| node.dyn_into::<HtmlAudioElement>().ok())
            {
                Some(clip) => clip,
                None => {
                    log::warn!("Failed to clone audio element - cue skipped");
                    return;
                }
            };

            clip.set_volume(CUE_VOLUME);
            // Autoplay policy may reject until the first user gesture
            if clip.play().is_err() {
                log::warn!("Audio playback refused");
            }
        }
    }
}
