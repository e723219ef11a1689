use std::collections::HashSet;

use rand::Rng;

use crate::{
    error::PuzzleError,
    models::{Grid, GridCell, Position, PuzzleLayout},
    utils::letters::{is_board_word, letter_to_digit, random_letter},
};

/// Board with only the planned words written in
type Skeleton = Vec<Vec<Option<char>>>;

pub struct GridGenerator;

impl GridGenerator {
    /// Build a playable board: planned words in place, every other cell a random letter
    pub fn generate(layout: &PuzzleLayout, rng: &mut impl Rng) -> Result<Grid, PuzzleError> {
        let skeleton = Self::place_words(layout)?;
        Ok(Self::fill(skeleton, rng)
            .into_iter()
            .map(|row| row.into_iter().map(GridCell::new).collect())
            .collect())
    }

    /// Build a read-only copy of the board where every word already shows its digit
    pub fn archive(layout: &PuzzleLayout, rng: &mut impl Rng) -> Result<Vec<String>, PuzzleError> {
        let mut skeleton = Self::place_words(layout)?;

        for placement in &layout.placements {
            let cell = &mut skeleton[placement.row][placement.col];
            if let Some(digit) = (*cell).and_then(letter_to_digit) {
                *cell = Some(digit);
            }
        }

        Ok(Self::fill(skeleton, rng)
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect())
    }

    /// Validate the layout and write every planned word into an empty board
    fn place_words(layout: &PuzzleLayout) -> Result<Skeleton, PuzzleError> {
        Self::validate_words(layout)?;

        let size = layout.size;
        let mut skeleton: Skeleton = vec![vec![None; size]; size];
        let listed: HashSet<&str> = layout.words.iter().map(String::as_str).collect();

        for placement in &layout.placements {
            if !listed.contains(placement.word.as_str()) {
                return Err(PuzzleError::UnknownPlacement(placement.word.clone()));
            }

            if !placement.direction.is_straight() {
                return Err(PuzzleError::InvalidDirection {
                    word: placement.word.clone(),
                    row_delta: placement.direction.row_delta,
                    col_delta: placement.direction.col_delta,
                });
            }

            let cells = placement.cells(size).ok_or_else(|| PuzzleError::OutOfBounds {
                word: placement.word.clone(),
                row: placement.row,
                col: placement.col,
                size,
            })?;

            for (pos, letter) in cells.iter().zip(placement.word.chars()) {
                Self::write_cell(&mut skeleton, *pos, letter, &placement.word)?;
            }
        }

        let placed: HashSet<&str> = layout
            .placements
            .iter()
            .map(|p| p.word.as_str())
            .collect();
        if let Some(missing) = layout.words.iter().find(|w| !placed.contains(w.as_str())) {
            return Err(PuzzleError::MissingPlacement(missing.clone()));
        }

        Ok(skeleton)
    }

    fn validate_words(layout: &PuzzleLayout) -> Result<(), PuzzleError> {
        if layout.size == 0 {
            return Err(PuzzleError::InvalidGridSize);
        }
        if layout.words.is_empty() {
            return Err(PuzzleError::EmptyWordList);
        }

        let mut seen = HashSet::new();
        for word in &layout.words {
            if !is_board_word(word) {
                return Err(PuzzleError::InvalidWord(word.clone()));
            }
            if !seen.insert(word.as_str()) {
                return Err(PuzzleError::DuplicateWord(word.clone()));
            }
        }

        Ok(())
    }

    fn write_cell(
        skeleton: &mut Skeleton,
        pos: Position,
        letter: char,
        word: &str,
    ) -> Result<(), PuzzleError> {
        let cell = &mut skeleton[pos.row][pos.col];
        match *cell {
            Some(existing) if existing != letter => Err(PuzzleError::Conflict {
                word: word.to_string(),
                at: pos,
                existing,
                wanted: letter,
            }),
            _ => {
                *cell = Some(letter);
                Ok(())
            }
        }
    }

    fn fill(skeleton: Skeleton, rng: &mut impl Rng) -> Vec<Vec<char>> {
        skeleton
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.unwrap_or_else(|| random_letter(rng)))
                    .collect()
            })
            .collect()
    }
}
