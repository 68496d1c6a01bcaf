//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pointer, touch, keyboard) mapped to game commands
//! - Frame timing from monotonic frame timestamps

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{InputEvent, command_for};
