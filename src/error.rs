//! Error types
//!
//! Only startup can fail: bad configuration or missing sprites. Steady-state play has
//! no error paths.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::GapTier;

/// Invalid combination of screen size, sprite size, and gap tier
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("gap tier {tier:?} ({gap}px) leaves no valid pipe position on a {screen_height}px screen")]
    GapTooLarge {
        tier: GapTier,
        gap: f32,
        screen_height: f32,
    },
    #[error("avatar sprite is {height}px tall, screen is only {screen_height}px")]
    SpriteTooLarge { height: f32, screen_height: f32 },
}

/// Sprite could not be loaded (fatal, never retried)
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("sprite file not found: {0}")]
    Missing(PathBuf),
    #[error("failed to decode sprite {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Anything that can stop the game from starting or shutting down cleanly
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write frame image")]
    Image(#[from] image::ImageError),
}
