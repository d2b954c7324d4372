//! Driver configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use slidetoe_engine::{DEFAULT_MAX_WINS, MatchConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for one driver session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Round wins that end the match.
    #[serde(default = "default_max_wins")]
    max_wins_to_end_match: u32,

    /// Pause between a round win and the next round, in milliseconds.
    #[serde(default = "default_round_cooldown_ms")]
    round_cooldown_ms: u64,

    /// Pause between a match win and the automatic reset, in milliseconds.
    #[serde(default = "default_match_cooldown_ms")]
    match_cooldown_ms: u64,

    /// Where snapshots are stored.
    #[serde(default = "default_snapshot_path")]
    snapshot_path: PathBuf,
}

#[instrument]
fn default_max_wins() -> u32 {
    DEFAULT_MAX_WINS
}

#[instrument]
fn default_round_cooldown_ms() -> u64 {
    3_000
}

#[instrument]
fn default_match_cooldown_ms() -> u64 {
    5_000
}

#[instrument]
fn default_snapshot_path() -> PathBuf {
    PathBuf::from("slidetoe.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_wins_to_end_match: default_max_wins(),
            round_cooldown_ms: default_round_cooldown_ms(),
            match_cooldown_ms: default_match_cooldown_ms(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(max_wins = config.max_wins_to_end_match, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file when it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Engine settings derived from this config.
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::new(self.max_wins_to_end_match)
    }

    /// Round cooldown as a duration.
    pub fn round_cooldown(&self) -> Duration {
        Duration::from_millis(self.round_cooldown_ms)
    }

    /// Match cooldown as a duration.
    pub fn match_cooldown(&self) -> Duration {
        Duration::from_millis(self.match_cooldown_ms)
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
