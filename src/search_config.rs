//! Search configuration for the computer player.

use crate::games::tictactoe::Player;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Deepest useful search: one ply per cell.
pub const MAX_DEPTH: u8 = 9;

/// How the minimax player searches.
///
/// Loaded from TOML, every field optional:
///
/// ```toml
/// goal = "X"
/// max_first = true
/// depth = 9
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct SearchConfig {
    /// Mark the maximizing player is trying to complete.
    #[serde(default = "default_goal")]
    goal: Player,

    /// Whether the maximizing player makes the first move.
    #[serde(default = "default_max_first")]
    max_first: bool,

    /// Plies to look ahead (1-9).
    #[serde(default = "default_depth")]
    depth: u8,
}

fn default_goal() -> Player {
    Player::X
}

fn default_max_first() -> bool {
    true
}

fn default_depth() -> u8 {
    MAX_DEPTH
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            goal: default_goal(),
            max_first: default_max_first(),
            depth: default_depth(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(goal = %config.goal, max_first = config.max_first, depth = config.depth, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the depth is within 1-9.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(ConfigError::new(format!(
                "Search depth must be between 1 and {}, got {}",
                MAX_DEPTH, self.depth
            )));
        }
        Ok(())
    }

    /// The mark that makes the first move of the game.
    pub fn first_mover(&self) -> Player {
        if self.max_first {
            self.goal
        } else {
            self.goal.opponent()
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(*config.goal(), Player::X);
        assert!(*config.max_first());
        assert_eq!(*config.depth(), 9);
        assert_eq!(config.first_mover(), Player::X);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SearchConfig::from_toml("goal = \"O\"").unwrap();
        assert_eq!(*config.goal(), Player::O);
        assert_eq!(*config.depth(), 9);
        assert_eq!(config.first_mover(), Player::O);
    }

    #[test]
    fn test_min_first() {
        let config = SearchConfig::default().with_max_first(false);
        assert_eq!(config.first_mover(), Player::O);
    }

    #[test]
    fn test_depth_out_of_range_rejected() {
        assert!(SearchConfig::from_toml("depth = 0").is_err());
        assert!(SearchConfig::from_toml("depth = 10").is_err());
        assert!(SearchConfig::default().with_depth(4).validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = SearchConfig::from_toml("goal = \"Z\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
