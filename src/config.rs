use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::heuristic::MAX_WEIGHT;
use crate::ai::EvaluatorWeights;
use crate::error::ConfigError;
use crate::game::{Player, COLS, ROWS};

/// Deepest search accepted from configuration.
pub const MAX_SEARCH_DEPTH: u32 = 10;

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            cols: COLS,
        }
    }
}

/// Search depth and evaluator weights for the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u32,
    #[serde(flatten)]
    pub weights: EvaluatorWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 4,
            weights: EvaluatorWeights::default(),
        }
    }
}

/// Who plays which piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ai_player: Player,
    pub first_player: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            ai_player: Player::Yellow,
            first_player: Player::Red,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be > 0".into()));
        }
        if self.board.cols == 0 {
            return Err(ConfigError::Validation("board.cols must be > 0".into()));
        }
        if self.search.depth == 0 || self.search.depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.depth must be in [1, {MAX_SEARCH_DEPTH}]"
            )));
        }

        let weights = &self.search.weights;
        if weights.two_in_a_row < 0 {
            return Err(ConfigError::Validation(
                "search.two_in_a_row_score must be >= 0".into(),
            ));
        }
        if weights.three_in_a_row < weights.two_in_a_row {
            return Err(ConfigError::Validation(
                "search.three_in_a_row_score must be >= search.two_in_a_row_score".into(),
            ));
        }
        if weights.win < weights.three_in_a_row {
            return Err(ConfigError::Validation(
                "search.win_score must be >= search.three_in_a_row_score".into(),
            ));
        }
        if weights.win > MAX_WEIGHT {
            return Err(ConfigError::Validation(format!(
                "search.win_score must be <= {MAX_WEIGHT}"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
