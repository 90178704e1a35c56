//! Application configuration loaded from TOML.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strictly_simon::Pacing;
use tracing::{debug, info, instrument};

use crate::AudioMode;

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "STRICTLY_SIMON_DB";

/// Configuration for the Simon app.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SimonConfig {
    /// SQLite database file holding the leaderboard.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// File the TUI writes its logs to.
    #[serde(default = "default_log_file")]
    log_file: String,

    /// Cue player.
    #[serde(default)]
    audio: AudioMode,

    /// Playback and feedback timing.
    #[serde(default)]
    pacing: Pacing,
}

fn default_db_path() -> String {
    "strictly_simon.db".to_string()
}

fn default_log_file() -> String {
    "strictly_simon.log".to_string()
}

impl Default for SimonConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_file: default_log_file(),
            audio: AudioMode::default(),
            pacing: Pacing::default(),
        }
    }
}

impl SimonConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(db_path = %config.db_path, audio = %config.audio, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    ///
    /// The database path is then overridden by [`DB_PATH_ENV`] when set.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        Ok(config.with_db_path_override(std::env::var(DB_PATH_ENV).ok()))
    }

    /// Replaces the database path when `db_path` is `Some`.
    pub fn with_db_path_override(mut self, db_path: Option<String>) -> Self {
        if let Some(db_path) = db_path {
            debug!(%db_path, "Overriding database path");
            self.db_path = db_path;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
