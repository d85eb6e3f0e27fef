//! Platform abstraction layer
//!
//! Narrow interfaces to the outside world, consumed by the game loop:
//! - Time: frame delta and rate throttling
//! - Input: per-frame flap/quit signals

pub mod input;
pub mod time;

pub use input::{DemoInput, InputFrame, InputSource, ScriptedInput};
pub use time::{Clock, FixedClock, FrameClock};
