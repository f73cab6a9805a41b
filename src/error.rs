use std::path::PathBuf;

/// A rejected drop. The board is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("column {column} is out of range (board has {cols} columns)")]
    OutOfRange { column: usize, cols: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// Errors raised when constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be non-zero, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Errors raised by move selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal moves available")]
    NoLegalMoves,
}

/// Errors raised by the game-state wrapper and play sessions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("it is not a human player's turn")]
    NotHumanTurn,

    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
