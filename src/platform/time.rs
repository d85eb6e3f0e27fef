//! Frame clocks

use std::thread;
use std::time::{Duration, Instant};

/// Supplies the elapsed time per frame and holds the loop to a target rate
pub trait Clock {
    /// Block until the next frame is due, then return seconds since the previous call
    fn tick(&mut self, fps: u32) -> f32;
}

/// Wall-clock throttle (sleeps off the rest of each frame)
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn tick(&mut self, fps: u32) -> f32 {
        let frame = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        let since = self.last.elapsed();
        if since < frame {
            thread::sleep(frame - since);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Deterministic clock: every frame takes exactly `dt`, nothing sleeps
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Clock for FixedClock {
    fn tick(&mut self, _fps: u32) -> f32 {
        self.dt
    }
}
