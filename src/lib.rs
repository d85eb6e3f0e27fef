//! Flappy - a side-scrolling flap-through-the-gaps arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, pipe stream, scoring, game state)
//! - `renderer`: Rendering collaborator trait and scene composition
//! - `platform`: Input and frame clock abstractions
//! - `assets`: Sprite table (PNG loading or placeholders)
//! - `highscores`: Persisted best score
//! - `settings`: Player-facing options

pub mod assets;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetTable, Sprite, SpriteId};
pub use error::{AssetError, ConfigError, GameError};
pub use game::Game;
pub use highscores::HighScoreFile;
pub use settings::{Backdrop, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: f32 = 288.0;
    pub const SCREEN_HEIGHT: f32 = 512.0;

    /// Target frame rate of the loop
    pub const FPS: u32 = 30;
    /// Fixed simulation timestep (one tick per frame at the target rate)
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1000.0;
    /// Upward speed set by a flap (pixels/s)
    pub const FLAP_FORCE: f32 = 250.0;
    /// Background scroll speed; pipes move at twice this for parallax
    pub const GAME_SPEED: f32 = 50.0;
    pub const PIPE_PARALLAX: f32 = 2.0;

    /// Avatar spawn position (top-left)
    pub const BIRD_START_X: f32 = SCREEN_WIDTH / 2.0 - 50.0;
    pub const BIRD_START_Y: f32 = SCREEN_HEIGHT / 2.0;
    /// Frames each wing phase is held
    pub const ANIMATION_FRAMES: u32 = 3;

    /// Velocity → tilt mapping (degrees, positive = nose down)
    pub const TILT_VEL_MIN: f32 = -100.0;
    pub const TILT_VEL_MAX: f32 = 400.0;
    pub const TILT_MIN: f32 = -30.0;
    pub const TILT_MAX: f32 = 60.0;

    /// Menu idle bob
    pub const MENU_BOB_HEIGHT: f32 = 6.0;
    pub const MENU_BOB_SPEED: f32 = 4.0;

    /// Distance kept between the gap and the top/bottom screen edges
    pub const PIPE_EDGE_OFFSET: f32 = 10.0;
    /// Horizontal distance between one pipe's right edge and the next pipe
    pub const PIPE_SPACING: f32 = 120.0;
    /// Extra margin past the left screen edge before a pipe is recycled
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Where the first pipe of a run appears (left edge)
    pub const FIRST_PIPE_X: f32 = SCREEN_WIDTH + 10.0 + PIPE_SPACING;

    /// Pixels between digits in the score HUD
    pub const LETTER_SPACING: f32 = 3.0;
    /// Left padding inside the score HUD
    pub const SCORE_PADDING: f32 = 5.0;
}

/// Linearly remap `value` (clamped to `[in_min, in_max]`) onto `[out_min, out_max]`
#[inline]
pub fn remap_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let v = value.clamp(in_min, in_max);
    (v - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_clamped() {
        assert_eq!(remap_clamped(-100.0, -100.0, 400.0, -30.0, 60.0), -30.0);
        assert_eq!(remap_clamped(400.0, -100.0, 400.0, -30.0, 60.0), 60.0);
        assert_eq!(remap_clamped(150.0, -100.0, 400.0, -30.0, 60.0), 15.0);
        // Out of range clamps
        assert_eq!(remap_clamped(-1000.0, -100.0, 400.0, -30.0, 60.0), -30.0);
        assert_eq!(remap_clamped(9000.0, -100.0, 400.0, -30.0, 60.0), 60.0);
    }
}
