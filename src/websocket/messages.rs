use serde::{Deserialize, Serialize};

use crate::{
    game::{FoundWord, GameEvent},
    models::{Position, WordEntry},
};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    NewGame,
    PointerDown {
        row: usize,
        col: usize,
    },
    PointerMove {
        row: usize,
        col: usize,
    },
    /// `cell` is absent when the pointer was released outside the board
    PointerUp {
        #[serde(default)]
        cell: Option<Position>,
    },
    SelectWord {
        word: String,
    },
    ClearActive,
    SubmitCode {
        code: String,
    },
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameState {
        session_id: String,
        size: usize,
        grid: Vec<String>,
        words: Vec<WordEntry>,
        active_word: Option<String>,
    },
    CellSelectionChanged {
        cells: Vec<Position>,
    },
    WordFound {
        word: String,
        cells: Vec<Position>,
        digit: char,
        digit_cell: Position,
    },
    AllWordsFound,
    CodeChecked {
        correct: bool,
    },
    Error {
        message: String,
    },
}

impl From<GameEvent> for ServerMessage {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::CellSelectionChanged { cells } => ServerMessage::CellSelectionChanged { cells },
            GameEvent::WordFound(FoundWord {
                word,
                cells,
                digit,
                digit_cell,
            }) => ServerMessage::WordFound {
                word,
                cells,
                digit,
                digit_cell,
            },
            GameEvent::AllWordsFound => ServerMessage::AllWordsFound,
        }
    }
}
