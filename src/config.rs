use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Start a fresh game as soon as a winner is reported.
    pub auto_reset: bool,
    /// Keep a log of accepted moves for replay.
    pub record_history: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            auto_reset: false,
            record_history: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = GameConfig::from_json(r#"{ "auto_reset": true }"#).unwrap();
        assert!(config.auto_reset);
        assert!(config.record_history);

        assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_bad_json_is_reported() {
        let err = GameConfig::from_json(r#"{ "auto_reset": "yes" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = GameConfig::load("/nonexistent/checkers.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
