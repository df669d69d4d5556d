//! Sprite and sound resources
//!
//! Everything is fetched once before the first step. A resource that errors
//! or never becomes ready fails the whole preload, so a session never starts
//! with missing art or audio.

use thiserror::Error;

use crate::consts::ASSET_LOAD_TIMEOUT_MS;

/// Sprite sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    /// Horizontal strip of animation frames
    Ball,
    Platform,
    Block,
}

impl SpriteId {
    pub const ALL: [SpriteId; 4] = [
        SpriteId::Background,
        SpriteId::Ball,
        SpriteId::Platform,
        SpriteId::Block,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpriteId::Background => "background",
            SpriteId::Ball => "ball",
            SpriteId::Platform => "platform",
            SpriteId::Block => "block",
        }
    }

    pub fn path(&self) -> String {
        format!("img/{}.png", self.name())
    }
}

/// Sound clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Bump,
}

impl SoundId {
    pub const ALL: [SoundId; 1] = [SoundId::Bump];

    pub fn name(&self) -> &'static str {
        match self {
            SoundId::Bump => "bump",
        }
    }

    pub fn path(&self) -> String {
        format!("sounds/{}.mp3", self.name())
    }
}

/// Why preloading failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The browser reported an error fetching or decoding the resource
    #[error("failed to load {path}")]
    LoadFailed { path: String },
    /// The resource was not ready before the deadline
    #[error("{path} not ready after {after_ms} ms")]
    TimedOut { path: String, after_ms: u32 },
    /// The DOM element for the resource could not be created
    #[error("cannot create element for {path}: {reason}")]
    Unavailable { path: String, reason: String },
}

/// What to preload and how long to wait for each resource
#[derive(Debug, Clone)]
pub struct AssetManifest {
    pub sprites: Vec<SpriteId>,
    pub sounds: Vec<SoundId>,
    pub timeout_ms: u32,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            sprites: SpriteId::ALL.to_vec(),
            sounds: SoundId::ALL.to_vec(),
            timeout_ms: ASSET_LOAD_TIMEOUT_MS,
        }
    }
}

impl AssetManifest {
    /// Number of resources that must be ready before play
    pub fn required(&self) -> usize {
        self.sprites.len() + self.sounds.len()
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{LoadedAssets, preload};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use js_sys::{Function, Promise};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{EventTarget, HtmlAudioElement, HtmlImageElement};

    use super::{AssetError, AssetManifest, SoundId, SpriteId};

    const ERROR_REASON: &str = "error";
    const TIMEOUT_REASON: &str = "timeout";

    /// Decoded resources, ready for drawing and playback
    pub struct LoadedAssets {
        pub sprites: HashMap<SpriteId, HtmlImageElement>,
        pub sounds: HashMap<SoundId, HtmlAudioElement>,
    }

    impl LoadedAssets {
        pub fn sprite(&self, id: SpriteId) -> Option<&HtmlImageElement> {
            self.sprites.get(&id)
        }

        pub fn sound(&self, id: SoundId) -> Option<&HtmlAudioElement> {
            self.sounds.get(&id)
        }
    }

    /// Promise settled by the first of: `ready_event`, `error`, or the timeout
    fn readiness(target: &EventTarget, ready_event: &str, timeout_ms: u32) -> Promise {
        Promise::new(&mut |resolve: Function, reject: Function| {
            let on_ready = Closure::<dyn FnMut()>::new(move || {
                let _ = resolve.call0(&JsValue::NULL);
            });
            let on_error = {
                let reject = reject.clone();
                Closure::<dyn FnMut()>::new(move || {
                    let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(ERROR_REASON));
                })
            };
            let on_timeout = Closure::<dyn FnMut()>::new(move || {
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(TIMEOUT_REASON));
            });

            let _ = target
                .add_event_listener_with_callback(ready_event, on_ready.as_ref().unchecked_ref());
            let _ =
                target.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    on_timeout.as_ref().unchecked_ref(),
                    timeout_ms as i32,
                );
            }

            on_ready.forget();
            on_error.forget();
            on_timeout.forget();
        })
    }

    async fn settle(promise: Promise, path: String, timeout_ms: u32) -> Result<(), AssetError> {
        match JsFuture::from(promise).await {
            Ok(_) => Ok(()),
            Err(reason) if reason.as_string().as_deref() == Some(TIMEOUT_REASON) => {
                Err(AssetError::TimedOut {
                    path,
                    after_ms: timeout_ms,
                })
            }
            Err(_) => Err(AssetError::LoadFailed { path }),
        }
    }

    fn unavailable(path: &str, err: JsValue) -> AssetError {
        AssetError::Unavailable {
            path: path.to_string(),
            reason: format!("{:?}", err),
        }
    }

    /// Fetch every resource in `manifest` concurrently and wait for all of them
    pub async fn preload(manifest: &AssetManifest) -> Result<LoadedAssets, AssetError> {
        let timeout_ms = manifest.timeout_ms;
        let mut pending = Vec::with_capacity(manifest.required());

        let mut sprites = HashMap::new();
        for &id in &manifest.sprites {
            let path = id.path();
            let image = HtmlImageElement::new().map_err(|e| unavailable(&path, e))?;
            pending.push((readiness(&image, "load", timeout_ms), path.clone()));
            image.set_src(&path);
            sprites.insert(id, image);
        }

        let mut sounds = HashMap::new();
        for &id in &manifest.sounds {
            let path = id.path();
            let audio = HtmlAudioElement::new_with_src(&path).map_err(|e| unavailable(&path, e))?;
            pending.push((readiness(&audio, "canplaythrough", timeout_ms), path));
            sounds.insert(id, audio);
        }

        // Already loading in parallel; awaiting in order only picks which
        // failure gets reported
        for (promise, path) in pending {
            settle(promise, path, timeout_ms).await?;
        }

        log::info!("Loaded {} assets", manifest.required());
        Ok(LoadedAssets { sprites, sounds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_paths() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.required(), 5);
        let sprites: Vec<String> = manifest.sprites.iter().map(SpriteId::path).collect();
        assert_eq!(
            sprites,
            vec![
                "img/background.png",
                "img/ball.png",
                "img/platform.png",
                "img/block.png",
            ]
        );
        assert_eq!(manifest.sounds[0].path(), "sounds/bump.mp3");
        assert_eq!(manifest.timeout_ms, 10_000);
    }

    #[test]
    fn test_error_display() {
        let err = AssetError::LoadFailed {
            path: "img/ball.png".into(),
        };
        assert_eq!(err.to_string(), "failed to load img/ball.png");

        let err = AssetError::TimedOut {
            path: "sounds/bump.mp3".into(),
            after_ms: 10_000,
        };
        assert_eq!(err.to_string(), "sounds/bump.mp3 not ready after 10000 ms");

        let err: Box<dyn std::error::Error> = Box::new(AssetError::Unavailable {
            path: "img/block.png".into(),
            reason: "no document".into(),
        });
        assert_eq!(
            err.to_string(),
            "cannot create element for img/block.png: no document"
        );
    }
}
