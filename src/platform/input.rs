//! Input sources
//!
//! Key bindings and debouncing live on this side of the boundary: the game only ever
//! sees "flap pressed this frame" and "quit requested".

use std::collections::VecDeque;

/// Input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Flap/confirm was pressed this frame (edge, not level)
    pub flap: bool,
    /// Window close or equivalent
    pub quit: bool,
}

/// Something that can be polled once per frame
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Replays a fixed list of frames, then requests quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// `count` idle frames
    pub fn idle(count: usize) -> Self {
        Self::new(std::iter::repeat_n(InputFrame::default(), count))
    }

    /// Turn a level-triggered key state (held/not held per frame) into press edges
    pub fn from_key_states(held: impl IntoIterator<Item = bool>) -> Self {
        let mut was_held = false;
        let frames = held.into_iter().map(|down| {
            let flap = down && !was_held;
            was_held = down;
            InputFrame { flap, quit: false }
        });
        Self::new(frames.collect::<Vec<_>>())
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputFrame {
        self.frames.pop_front().unwrap_or(InputFrame {
            flap: false,
            quit: true,
        })
    }
}

/// No player: never presses, requests quit after a frame budget
#[derive(Debug, Clone)]
pub struct DemoInput {
    frames_left: u64,
}

impl DemoInput {
    pub fn new(frames: u64) -> Self {
        Self { frames_left: frames }
    }
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> InputFrame {
        if self.frames_left == 0 {
            return InputFrame {
                flap: false,
                quit: true,
            };
        }
        self.frames_left -= 1;
        InputFrame::default()
    }
}
