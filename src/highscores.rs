//! Best-score record
//!
//! Persisted as a text file holding one non-negative base-10 integer. A missing or
//! unreadable record is "no record yet" (0), never an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default record file, relative to the working directory
pub const DEFAULT_RECORD_PATH: &str = "data.txt";

/// The on-disk record
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record, creating the file with "0" if it does not exist yet
    pub fn load(&self) -> u32 {
        if !self.path.is_file() {
            log::info!("No record at {}, starting fresh", self.path.display());
            if let Err(e) = self.save(0) {
                log::warn!("Could not create record file {}: {}", self.path.display(), e);
            }
            return 0;
        }

        match fs::read_to_string(&self.path) {
            Ok(text) => match parse_record(&text) {
                Some(score) => {
                    log::info!("Loaded record {}", score);
                    score
                }
                None => {
                    log::warn!(
                        "Record file {} is corrupt ({:?}), treating as 0",
                        self.path.display(),
                        text
                    );
                    0
                }
            },
            Err(e) => {
                log::warn!("Could not read record file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    pub fn save(&self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())?;
        log::info!("Record {} saved to {}", score, self.path.display());
        Ok(())
    }
}

impl Default for HighScoreFile {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_PATH)
    }
}

/// Parse the file contents; surrounding whitespace is tolerated
fn parse_record(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}
