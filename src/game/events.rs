use serde::{Deserialize, Serialize};

use crate::models::Position;

/// A word the player has uncovered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    /// Covered cells, in the word's own reading order
    pub cells: Vec<Position>,
    /// Digit that replaced the word's first letter
    pub digit: char,
    pub digit_cell: Position,
}

/// Output of the engine, consumed by whoever hosts the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Transient highlight changed; empty when the selection was cleared
    CellSelectionChanged { cells: Vec<Position> },
    WordFound(FoundWord),
    /// Fired once, after the last word is found
    AllWordsFound,
}
