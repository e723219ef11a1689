use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step `n` cells along `direction`, or `None` if that leaves the grid
    pub fn offset(&self, direction: Direction, n: usize, size: usize) -> Option<Position> {
        let n = n as isize;
        let row = self.row as isize + direction.row_delta as isize * n;
        let col = self.col as isize + direction.col_delta as isize * n;
        if row < 0 || col < 0 || row >= size as isize || col >= size as isize {
            return None;
        }
        Some(Position::new(row as usize, col as usize))
    }
}

/// Row/column step of a placed word. Exactly one delta is nonzero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Direction {
    #[serde(rename = "dr")]
    pub row_delta: i8,
    #[serde(rename = "dc")]
    pub col_delta: i8,
}

impl Direction {
    pub const RIGHT: Direction = Direction { row_delta: 0, col_delta: 1 };
    pub const LEFT: Direction = Direction { row_delta: 0, col_delta: -1 };
    pub const DOWN: Direction = Direction { row_delta: 1, col_delta: 0 };
    pub const UP: Direction = Direction { row_delta: -1, col_delta: 0 };

    /// Horizontal or vertical unit step
    pub fn is_straight(&self) -> bool {
        let valid = |d: i8| (-1..=1).contains(&d);
        valid(self.row_delta)
            && valid(self.col_delta)
            && (self.row_delta == 0) != (self.col_delta == 0)
    }
}

/// A designer-chosen word position on the board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub row: usize,
    pub col: usize,
    #[serde(flatten)]
    pub direction: Direction,
}

impl Placement {
    pub fn new(word: &str, row: usize, col: usize, direction: Direction) -> Self {
        Self {
            word: word.to_string(),
            row,
            col,
            direction,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Cells covered by the word, or `None` if any of them is off the grid
    pub fn cells(&self, size: usize) -> Option<Vec<Position>> {
        (0..self.word.chars().count())
            .map(|i| self.start().offset(self.direction, i, size))
            .collect()
    }
}

/// Static description of one puzzle board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleLayout {
    pub size: usize,
    pub words: Vec<String>,
    pub placements: Vec<Placement>,
}

/// Highlight state of a cell
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CellMark {
    #[default]
    None,
    Selected,
    Found,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    /// Letter placed or filled at construction. Never changes.
    pub letter: char,
    /// Shown in place of the letter once a found word starts here
    pub digit: Option<char>,
    pub mark: CellMark,
}

impl GridCell {
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            digit: None,
            mark: CellMark::None,
        }
    }

    /// What the player sees in this cell
    pub fn shown(&self) -> char {
        self.digit.unwrap_or(self.letter)
    }
}

pub type Grid = Vec<Vec<GridCell>>;

/// Entry of the word list shown to the player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub found: bool,
}
