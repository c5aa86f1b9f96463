//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/frame deltas
//! - Input events

pub mod input;
pub mod time;

pub use input::{Intent, intent_for_key, intent_for_pointer};
pub use time::{clamp_delta, frame_delta, now_ms};
