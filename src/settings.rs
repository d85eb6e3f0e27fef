//! Game settings and preferences
//!
//! Persisted as JSON next to the record file. Physics tuning stays in `consts`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use crate::assets::Backdrop;
use crate::consts::FPS;
use crate::highscores::DEFAULT_RECORD_PATH;
use crate::sim::{BirdColor, GapTier};

/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Look ===
    pub bird_color: BirdColor,
    pub backdrop: Backdrop,

    // === Gameplay ===
    /// Fixed gap size for the whole session
    pub gap_tier: GapTier,
    /// Pipe layout seed (random when absent)
    pub seed: Option<u64>,
    /// Frame rate the loop is throttled to
    pub fps: u32,

    // === Files ===
    pub record_path: PathBuf,
    /// Sprite directory (flat placeholder art when absent)
    pub assets_dir: Option<PathBuf>,

    // === Demo runner ===
    /// Frames to run before quitting
    pub demo_frames: u64,
    /// Let the AI play
    pub autopilot: bool,
    /// Write the final frame here as PNG
    pub screenshot_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bird_color: BirdColor::Yellow,
            backdrop: Backdrop::Day,

            gap_tier: GapTier::Easy,
            seed: None,
            fps: FPS,

            record_path: PathBuf::from(DEFAULT_RECORD_PATH),
            assets_dir: None,

            demo_frames: 30 * FPS as u64,
            autopilot: true,
            screenshot_path: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Malformed settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
