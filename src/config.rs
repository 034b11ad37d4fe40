// Game configuration loaded from JSON

use crate::board::Color;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MIN_ROWS: u8 = 6;
pub const MIN_COLS: u8 = 8;
/// Files are lettered a..z
pub const MAX_DIMENSION: u8 = 26;

/// Settings for a game session; every field has a default
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: u8,
    pub cols: u8,
    /// Replace four pawns with a Phantom and a Warden per side
    pub custom_pieces: bool,
    pub light_name: String,
    pub dark_name: String,
    pub light_computer: bool,
    pub dark_computer: bool,
    /// Seed for the computer players; random when absent
    pub seed: Option<u64>,
    /// Turn cap for computer-vs-computer games
    pub max_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 8,
            cols: 8,
            custom_pieces: true,
            light_name: "Player Light".to_string(),
            dark_name: "Player Dark".to_string(),
            light_computer: false,
            dark_computer: true,
            seed: None,
            max_turns: 200,
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rows_ok = (MIN_ROWS..=MAX_DIMENSION).contains(&self.rows);
        let cols_ok = (MIN_COLS..=MAX_DIMENSION).contains(&self.cols);
        if rows_ok && cols_ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn name_of(&self, color: Color) -> &str {
        match color {
            Color::Light => &self.light_name,
            Color::Dark => &self.dark_name,
        }
    }

    pub fn is_computer(&self, color: Color) -> bool {
        match color {
            Color::Light => self.light_computer,
            Color::Dark => self.dark_computer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.rows, config.cols), (8, 8));
        assert!(config.is_computer(Color::Dark));
        assert!(!config.is_computer(Color::Light));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json_str(r#"{"rows": 10, "cols": 12, "seed": 42}"#)
            .expect("valid config");
        assert_eq!(config.rows, 10);
        assert_eq!(config.cols, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.name_of(Color::Light), "Player Light");
        assert_eq!(config.max_turns, 200);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let narrow = GameConfig::from_json_str(r#"{"cols": 7}"#);
        assert!(matches!(narrow, Err(ConfigError::InvalidDimensions { rows: 8, cols: 7 })));

        let short = GameConfig {
            rows: 5,
            ..GameConfig::default()
        };
        assert!(short.validate().is_err());

        let huge = GameConfig {
            cols: 27,
            ..GameConfig::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = GameConfig::from_json_str("{ rows: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameConfig::from_json_file("/nonexistent/warden-chess.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
