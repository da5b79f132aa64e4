//! JSON file persistence for the high score.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use block_blast_core::HighScoreStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// Stores `{"high_score": n}` at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_DATA_HOME/block-blast/high_score.json`, falling back to
    /// `$HOME/.local/share` and then the working directory.
    pub fn default_path() -> PathBuf {
        let base = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".local");
                    p.push("share");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("block-blast");
        path.push("high_score.json");
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored score; a missing file reads as 0.
    pub fn read(&self) -> Result<u32, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let file: HighScoreFile = serde_json::from_slice(&bytes)?;
        Ok(file.high_score)
    }

    pub fn write(&self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&HighScoreFile { high_score: score })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn load_high_score(&mut self) -> u32 {
        self.read().unwrap_or_else(|err| {
            log::warn!("ignoring high score at {}: {err}", self.path.display());
            0
        })
    }

    fn save_high_score(&mut self, score: u32) {
        if let Err(err) = self.write(score) {
            log::warn!("could not save high score to {}: {err}", self.path.display());
        }
    }
}
