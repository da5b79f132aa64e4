//! Environment configuration for the terminal binary.
//!
//! Every variable is optional. Unparseable values fall back to their defaults.

use std::path::PathBuf;

use log::LevelFilter;

use crate::core::GameConfig;

pub const ENV_SEED: &str = "BLOCK_BLAST_SEED";
pub const ENV_BOARD_SIZE: &str = "BLOCK_BLAST_BOARD_SIZE";
pub const ENV_HIGH_SCORE_PATH: &str = "BLOCK_BLAST_HIGH_SCORE_PATH";
pub const ENV_LOG_PATH: &str = "BLOCK_BLAST_LOG_PATH";
pub const ENV_LOG_LEVEL: &str = "BLOCK_BLAST_LOG_LEVEL";
pub const ENV_SOUND: &str = "BLOCK_BLAST_SOUND";
pub const ENV_HAPTICS: &str = "BLOCK_BLAST_HAPTICS";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub game: GameConfig,
    /// `None` uses the store's default location.
    pub high_score_path: Option<PathBuf>,
    /// Logging is disabled when unset; the terminal is busy drawing the game.
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub sound: bool,
    pub haptics: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            high_score_path: None,
            log_path: None,
            log_level: LevelFilter::Info,
            sound: true,
            haptics: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let defaults = Self::default();

        let mut game = defaults.game;
        game.seed = get(ENV_SEED).and_then(|s| s.parse().ok());
        if let Some(size) = get(ENV_BOARD_SIZE).and_then(|s| s.parse().ok()) {
            game.board_size = size;
        }

        Self {
            game: game.normalized(),
            high_score_path: get(ENV_HIGH_SCORE_PATH).map(PathBuf::from),
            log_path: get(ENV_LOG_PATH).map(PathBuf::from),
            log_level: get(ENV_LOG_LEVEL)
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.log_level),
            sound: get(ENV_SOUND)
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.sound),
            haptics: get(ENV_HAPTICS)
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.haptics),
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
