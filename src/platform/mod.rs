//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic clock, frame deltas)
//! - Input events folded into per-tick level state

pub mod input;
pub mod time;

pub use input::{Direction, InputEvent, InputState};
pub use time::{Clock, FrameTimer, ManualClock, MonotonicClock};
