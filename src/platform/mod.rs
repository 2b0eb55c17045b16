//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, touch, on-screen buttons)
//! - Frame timing

pub mod input;
pub mod time;

pub use input::{InputAction, TouchTracker, map_key_down, map_key_up};
pub use time::FrameClock;
