//! Rendering module
//!
//! `draw_list` decides what goes on screen; `canvas` paints it with the 2D
//! canvas API in the browser.

pub mod draw_list;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw_list::{DrawCommand, build_frame};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
