//! Platform abstraction layer
//!
//! Translates browser input into game commands.

pub mod input;

pub use input::{KeyAction, map_key_down, map_key_up};
