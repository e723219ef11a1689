use thiserror::Error;

use crate::models::Position;

/// Reasons a puzzle layout cannot be turned into a board
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("word list is empty")]
    EmptyWordList,

    #[error("grid size must be at least 1")]
    InvalidGridSize,

    #[error("word '{0}' must consist of letters A-Z only")]
    InvalidWord(String),

    #[error("word '{0}' is listed more than once")]
    DuplicateWord(String),

    #[error("placement of '{word}' has invalid direction ({row_delta}, {col_delta})")]
    InvalidDirection {
        word: String,
        row_delta: i8,
        col_delta: i8,
    },

    #[error("placement of '{word}' at ({row}, {col}) leaves the {size}x{size} grid")]
    OutOfBounds {
        word: String,
        row: usize,
        col: usize,
        size: usize,
    },

    #[error("'{word}' needs '{wanted}' at ({}, {}) but '{existing}' is already there", .at.row, .at.col)]
    Conflict {
        word: String,
        at: Position,
        existing: char,
        wanted: char,
    },

    #[error("placement for '{0}' does not match any listed word")]
    UnknownPlacement(String),

    #[error("word '{0}' has no placement")]
    MissingPlacement(String),
}
