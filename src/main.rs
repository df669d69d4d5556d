//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use brick_breaker::SpriteAnimation;
    use brick_breaker::assets::{self, AssetManifest, SoundId};
    use brick_breaker::audio::{AudioManager, SoundEffect};
    use brick_breaker::consts::*;
    use brick_breaker::platform::{KeyAction, map_key_down, map_key_up};
    use brick_breaker::renderer::CanvasRenderer;
    use brick_breaker::sim::{GameEvent, GameState, Outcome, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        renderer: CanvasRenderer,
        audio: Option<AudioManager>,
        /// Written only by the animation interval; read at render time
        animation: Rc<RefCell<SpriteAnimation>>,
    }

    impl Game {
        /// Run one simulation step and react to its events
        fn update(&mut self) {
            let events = tick(&mut self.state, &self.input);
            self.input.commands.clear();

            for event in &events {
                if let (Some(effect), Some(audio)) = (SoundEffect::for_event(event), &self.audio) {
                    audio.play(effect);
                }
                if *event == GameEvent::Launched {
                    start_ball_animation(self.animation.clone());
                }
            }
        }

        fn render(&self) {
            self.renderer.render(&self.state, &self.animation.borrow());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Brick Breaker starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No window/document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No canvas element #{}", CANVAS_ID);
                return;
            }
        };
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        // Never enter the loop without every sprite and sound
        let assets = match assets::preload(&AssetManifest::default()).await {
            Ok(assets) => assets,
            Err(e) => {
                log::error!("Asset preload failed: {}", e);
                return;
            }
        };

        let audio = assets.sound(SoundId::Bump).cloned().map(AudioManager::new);
        if audio.is_none() {
            log::warn!("No bump sound loaded - audio disabled");
        }

        let Some(renderer) = CanvasRenderer::new(&canvas, assets) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            input: TickInput::default(),
            renderer,
            audio,
            animation: Rc::new(RefCell::new(SpriteAnimation::new())),
        }));

        log::info!("Session initialized with seed: {}", seed);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(action) = map_key_down(&event.key()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                match action {
                    KeyAction::Command(command) => g.input.commands.push(command),
                    KeyAction::ToggleAutopilot => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    KeyAction::ToggleMute => {
                        if let Some(audio) = g.audio.as_mut() {
                            log::info!("Muted: {}", audio.toggle_muted());
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let command = map_key_up(&event.key());
                game.borrow_mut().input.commands.push(command);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Cycle the ball sprite every interval, independent of the frame loop
    fn start_ball_animation(animation: Rc<RefCell<SpriteAnimation>>) {
        if animation.borrow().is_running() {
            return;
        }
        animation.borrow_mut().start();

        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || animation.borrow_mut().advance());
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            BALL_ANIMATION_INTERVAL_MS as i32,
        );
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.state.outcome()
        };

        // Stop scheduling once the session is over
        match outcome {
            None => request_animation_frame(game),
            Some(outcome) => end_session(&game.borrow().state, outcome),
        }
    }

    /// Show the result, then reload the page for a clean session
    fn end_session(state: &GameState, outcome: Outcome) {
        match serde_json::to_string(&state.summary()) {
            Ok(json) => log::info!("Session summary: {}", json),
            Err(e) => log::warn!("Failed to serialize summary: {}", e),
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let _ = window.alert_with_message(outcome.message());
        let _ = window.location().reload();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Upper bound for the native demo (ten minutes at 60 fps)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_MAX_FRAMES: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode plays a headless autopilot session - serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(clock_seed);

    let summary = brick_breaker::sim::run_headless(seed, DEMO_MAX_FRAMES);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
