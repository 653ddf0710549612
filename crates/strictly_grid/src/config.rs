//! Engine configuration.

use crate::types::BoardSize;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings chosen before a session starts.
///
/// ```toml
/// board_size = 4
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Side length for every round of the session.
    #[serde(default)]
    pub board_size: BoardSize,
}

impl EngineConfig {
    /// Creates a configuration for the given size.
    pub fn new(board_size: BoardSize) -> Self {
        Self { board_size }
    }

    /// Parses configuration from TOML text.
    ///
    /// Missing keys fall back to defaults; out-of-range sizes are rejected.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        debug!(board_size = config.board_size.get(), "Config parsed");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(board_size = config.board_size.get(), "Config loaded successfully");
        Ok(config)
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
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.board_size, BoardSize::DEFAULT);
    }

    #[test]
    fn test_board_size_parsed() {
        let config = EngineConfig::from_toml_str("board_size = 7").unwrap();
        assert_eq!(config.board_size.get(), 7);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = EngineConfig::from_toml_str("board_size = 10").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/strictly_grid.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }
}
