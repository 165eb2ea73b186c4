//! Error types for the tic-tac-toe evaluator crate

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: square ({row}, {col}) is already occupied")]
    InvalidMove { row: usize, col: usize },

    #[error("square ({row}, {col}) is out of bounds for a {dim}x{dim} board")]
    OutOfBounds { row: usize, col: usize, dim: usize },

    #[error("board dimension must be at least 1, got {dim}")]
    InvalidDimension { dim: usize },

    #[error("non-terminal board has no empty squares")]
    EmptyMoveSetOnNonTerminalBoard,

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("game already over")]
    GameOver,

    #[error("board string has {got} cells, which is not a square number, in '{context}'")]
    InvalidBoardLength { got: usize, context: String },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must differ by at most 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid player '{player}' (expected 'X' or 'O')")]
    InvalidPlayerString { player: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
