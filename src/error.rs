//! Errors for user-supplied configuration.
//!
//! Core puzzle operations are total over their inputs; only difficulty
//! names and custom grid sizes coming from outside are validated here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid size outside `1..=max`.
    #[error("grid size {size} is out of range (expected 1..={max})")]
    InvalidSize { size: usize, max: usize },

    /// Cell coordinates from outside that miss the board.
    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
}
