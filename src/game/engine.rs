use rand::Rng;
use tokio::sync::mpsc;

use crate::{
    error::PuzzleError,
    game::{
        events::{FoundWord, GameEvent},
        grid::GridGenerator,
        selection::{run_between, Selection},
        validator::{WordMatch, WordValidator},
    },
    models::{CellMark, Grid, GridCell, Placement, Position, PuzzleLayout, WordEntry},
    utils::letters::letter_to_digit,
};

/// One word search board and everything the player has done on it.
///
/// All calls are synchronous and never fail once the board is built.
/// Selections that are not a straight row/column run are dropped silently.
/// Every state change a UI needs to mirror is pushed to the event channel.
pub struct WordSearch {
    size: usize,
    grid: Grid,
    placements: Vec<Placement>,
    validator: WordValidator,
    selection: Option<Selection>,
    selected: Vec<Position>,
    active: Option<String>,
    completed: bool,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl WordSearch {
    pub fn new(
        layout: &PuzzleLayout,
        rng: &mut impl Rng,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<Self, PuzzleError> {
        let grid = GridGenerator::generate(layout, rng)?;

        tracing::debug!(
            "Built {}x{} word search with {} words",
            layout.size,
            layout.size,
            layout.words.len()
        );

        Ok(Self {
            size: layout.size,
            grid,
            placements: layout.placements.clone(),
            validator: WordValidator::new(&layout.words),
            selection: None,
            selected: Vec::new(),
            active: None,
            completed: false,
            events,
        })
    }

    /// Build a board together with the receiving end of its event channel
    pub fn with_channel(
        layout: &PuzzleLayout,
        rng: &mut impl Rng,
    ) -> Result<(Self, mpsc::UnboundedReceiver<GameEvent>), PuzzleError> {
        let (tx, rx) = mpsc::unbounded_channel();
        Ok((Self::new(layout, rng, tx)?, rx))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[cfg(test)]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn words(&self) -> &[WordEntry] {
        self.validator.entries()
    }

    pub fn active_word(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn found_count(&self) -> usize {
        self.words().iter().filter(|e| e.found).count()
    }

    #[cfg(test)]
    pub fn shown_at(&self, pos: Position) -> Option<char> {
        self.grid.get(pos.row)?.get(pos.col).map(GridCell::shown)
    }

    /// Rows of the board as strings, digits included
    pub fn rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| row.iter().map(GridCell::shown).collect())
            .collect()
    }

    /// Highlight a word from the list before dragging. Found or unknown words are ignored.
    pub fn select_word(&mut self, word: &str) -> bool {
        match self.validator.get(word) {
            Some(entry) if !entry.found => {
                self.active = Some(entry.word.clone());
                true
            }
            _ => false,
        }
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Start a drag gesture
    pub fn pointer_down(&mut self, pos: Position) {
        if !self.in_bounds(pos) {
            return;
        }
        self.clear_selection();
        self.selection = Some(Selection::new(pos));
    }

    /// Pointer moved over `pos` while pressed
    pub fn pointer_move(&mut self, pos: Position) {
        if !self.in_bounds(pos) {
            return;
        }
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        if selection.current == pos && !self.selected.is_empty() {
            return;
        }
        let Some(run) = selection.run_to(pos) else {
            return;
        };
        selection.current = pos;

        self.clear_marks();
        for cell in &run {
            let mark = &mut self.grid[cell.row][cell.col].mark;
            if *mark == CellMark::None {
                *mark = CellMark::Selected;
            }
        }
        self.selected = run.clone();
        self.emit(GameEvent::CellSelectionChanged { cells: run });
    }

    /// End the drag. `pos` is `None` when released outside the board.
    pub fn pointer_up(&mut self, pos: Option<Position>) -> Option<FoundWord> {
        let selection = self.selection.take()?;

        let found = pos
            .filter(|p| self.in_bounds(*p))
            .and_then(|p| run_between(selection.anchor, p))
            .and_then(|run| self.commit(run));

        self.clear_selection();
        found
    }

    /// Digits of every word's first letter, in list order
    pub fn expected_code(&self) -> String {
        self.words()
            .iter()
            .filter_map(|e| e.word.chars().next().and_then(letter_to_digit))
            .collect()
    }

    /// Compare a player's answer with the code, ignoring anything that is not a digit
    pub fn check_code(&self, input: &str) -> bool {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        digits == self.expected_code()
    }

    fn commit(&mut self, run: Vec<Position>) -> Option<FoundWord> {
        let read: String = run
            .iter()
            .map(|p| self.grid[p.row][p.col].letter)
            .collect();

        let WordMatch { index, forward } = self.validator.resolve(&read, self.active.as_deref())?;
        if !self.validator.mark_found(index) {
            return None;
        }

        let word = self.validator.entries()[index].word.clone();
        let mut cells = run;
        if !forward {
            cells.reverse();
        }
        let digit_cell = self.canonical_start(&word, &cells);
        let first = word.chars().next()?;
        let digit = letter_to_digit(first)?;

        for cell in &cells {
            self.grid[cell.row][cell.col].mark = CellMark::Found;
        }
        self.grid[digit_cell.row][digit_cell.col].digit = Some(digit);

        if self.active.as_deref() == Some(word.as_str()) {
            self.active = None;
        }

        tracing::info!(
            "Found '{}' ({}/{}), start ({}, {}) -> {}",
            word,
            self.found_count(),
            self.words().len(),
            digit_cell.row,
            digit_cell.col,
            digit
        );

        let found = FoundWord {
            word,
            cells,
            digit,
            digit_cell,
        };
        self.emit(GameEvent::WordFound(found.clone()));

        if !self.completed && self.validator.all_found() {
            self.completed = true;
            tracing::info!("All words found");
            self.emit(GameEvent::AllWordsFound);
        }

        Some(found)
    }

    /// Cell holding the word's first letter in its placed direction.
    /// `cells` must already be in reading order. A planned placement over
    /// the same cells wins.
    fn canonical_start(&self, word: &str, cells: &[Position]) -> Position {
        self.placements
            .iter()
            .filter(|p| p.word == word)
            .find(|p| {
                p.cells(self.size).is_some_and(|planned| {
                    planned.len() == cells.len() && planned.iter().all(|c| cells.contains(c))
                })
            })
            .map(Placement::start)
            .unwrap_or(cells[0])
    }

    fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.clear_marks();
        self.selected.clear();
        self.emit(GameEvent::CellSelectionChanged { cells: Vec::new() });
    }

    fn clear_marks(&mut self) {
        for cell in &self.selected {
            let mark = &mut self.grid[cell.row][cell.col].mark;
            if *mark == CellMark::Selected {
                *mark = CellMark::None;
            }
        }
    }

    fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn emit(&self, event: GameEvent) {
        tracing::debug!("Word search event: {:?}", event);
        if self.events.send(event).is_err() {
            tracing::trace!("Word search event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::default_layout, models::Direction};
    use rand::{rngs::StdRng, SeedableRng};

    fn board() -> (WordSearch, mpsc::UnboundedReceiver<GameEvent>) {
        let mut rng = StdRng::seed_from_u64(42);
        WordSearch::with_channel(&default_layout(), &mut rng).unwrap()
    }

    fn drag(game: &mut WordSearch, from: (usize, usize), to: (usize, usize)) -> Option<FoundWord> {
        let from = Position::new(from.0, from.1);
        let to = Position::new(to.0, to.1);
        game.pointer_down(from);
        game.pointer_move(to);
        game.pointer_up(Some(to))
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn words_found(events: &[GameEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::WordFound(found) => Some(found.word.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_cipher_row_selection() {
        let (mut game, mut rx) = board();

        let found = drag(&mut game, (1, 1), (1, 6)).unwrap();

        assert_eq!(found.word, "CIPHER");
        assert_eq!(found.digit, '3');
        assert_eq!(found.digit_cell, Position::new(1, 1));
        assert_eq!(game.shown_at(Position::new(1, 1)), Some('3'));
        assert!(game.words()[0].found);
        assert_eq!(words_found(&drain(&mut rx)), vec!["CIPHER"]);
        for col in 1..=6 {
            assert_eq!(game.grid()[1][col].mark, CellMark::Found);
        }
    }

    #[test]
    fn test_reverse_drag_converts_canonical_start() {
        let (mut game, _rx) = board();

        // LOGIC runs right-to-left from (4, 9); drag it left-to-right
        let found = drag(&mut game, (4, 5), (4, 9)).unwrap();

        assert_eq!(found.word, "LOGIC");
        assert_eq!(found.digit, '2');
        assert_eq!(found.digit_cell, Position::new(4, 9));
        assert_eq!(found.cells.first(), Some(&Position::new(4, 9)));
        assert_eq!(game.shown_at(Position::new(4, 9)), Some('2'));
        assert_eq!(game.shown_at(Position::new(4, 5)), Some('C'));
    }

    #[test]
    fn test_upward_word_dragged_downward() {
        let (mut game, _rx) = board();

        let found = drag(&mut game, (6, 9), (9, 9)).unwrap();

        assert_eq!(found.word, "DATA");
        assert_eq!(found.digit_cell, Position::new(9, 9));
        assert_eq!(game.shown_at(Position::new(9, 9)), Some('4'));
    }

    #[test]
    fn test_repeat_selection_is_idempotent() {
        let (mut game, mut rx) = board();

        assert!(drag(&mut game, (2, 2), (8, 2)).is_some());
        let rows_after_first = game.rows();
        drain(&mut rx);

        assert!(drag(&mut game, (2, 2), (8, 2)).is_none());
        assert!(drag(&mut game, (8, 2), (2, 2)).is_none());
        assert_eq!(game.rows(), rows_after_first);
        assert!(words_found(&drain(&mut rx)).is_empty());
        assert_eq!(game.found_count(), 1);
    }

    #[test]
    fn test_non_matching_run_changes_nothing() {
        let (mut game, mut rx) = board();
        let before = game.rows();

        // Overshoots CIPHER by one cell
        assert!(drag(&mut game, (1, 1), (1, 7)).is_none());

        assert_eq!(game.rows(), before);
        assert_eq!(game.found_count(), 0);
        assert!(game
            .grid()
            .iter()
            .flatten()
            .all(|cell| cell.mark == CellMark::None));
        let events = drain(&mut rx);
        assert!(words_found(&events).is_empty());
        assert_eq!(
            events.last(),
            Some(&GameEvent::CellSelectionChanged { cells: Vec::new() })
        );
    }

    #[test]
    fn test_off_line_release_is_discarded() {
        let (mut game, _rx) = board();

        game.pointer_down(Position::new(1, 1));
        game.pointer_move(Position::new(1, 6));
        assert_eq!(game.grid()[1][3].mark, CellMark::Selected);

        assert!(game.pointer_up(Some(Position::new(2, 6))).is_none());
        assert_eq!(game.found_count(), 0);
        assert_eq!(game.grid()[1][3].mark, CellMark::None);
    }

    #[test]
    fn test_release_outside_board_is_discarded() {
        let (mut game, _rx) = board();

        game.pointer_down(Position::new(1, 1));
        game.pointer_move(Position::new(1, 6));
        assert!(game.pointer_up(None).is_none());
        assert!(game.pointer_up(Some(Position::new(1, 6))).is_none());
        assert_eq!(game.found_count(), 0);
    }

    #[test]
    fn test_selection_is_not_cumulative() {
        let (mut game, mut rx) = board();

        game.pointer_down(Position::new(0, 0));
        game.pointer_move(Position::new(0, 4));
        game.pointer_move(Position::new(3, 0));
        // Diagonal hover keeps the last straight selection
        game.pointer_move(Position::new(5, 5));

        let selected: Vec<Position> = (0..10)
            .flat_map(|r| (0..10).map(move |c| Position::new(r, c)))
            .filter(|p| game.grid()[p.row][p.col].mark == CellMark::Selected)
            .collect();
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|p| p.col == 0));

        assert_eq!(
            drain(&mut rx).last(),
            Some(&GameEvent::CellSelectionChanged {
                cells: (0..=3).map(|r| Position::new(r, 0)).collect()
            })
        );
    }

    #[test]
    fn test_all_words_found_fires_once() {
        let (mut game, mut rx) = board();

        drag(&mut game, (1, 1), (1, 6));
        drag(&mut game, (2, 2), (8, 2));
        drag(&mut game, (9, 9), (6, 9));
        assert!(!game.is_complete());
        drag(&mut game, (4, 9), (4, 5));
        assert!(game.is_complete());

        drag(&mut game, (4, 9), (4, 5));
        drag(&mut game, (1, 1), (1, 6));

        let events = drain(&mut rx);
        let completions = events
            .iter()
            .filter(|e| **e == GameEvent::AllWordsFound)
            .count();
        assert_eq!(completions, 1);
        assert_eq!(
            words_found(&events),
            vec!["CIPHER", "ENCRYPT", "DATA", "LOGIC"]
        );
        assert_eq!(game.rows()[1].chars().nth(1), Some('3'));
        assert_eq!(game.rows()[2].chars().nth(2), Some('5'));
    }

    #[test]
    fn test_active_word_is_preferred_and_cleared() {
        let layout = PuzzleLayout {
            size: 4,
            words: vec!["AB".to_string(), "BA".to_string()],
            placements: vec![
                Placement::new("AB", 0, 0, Direction::RIGHT),
                Placement::new("BA", 0, 1, Direction::LEFT),
            ],
        };
        let mut rng = StdRng::seed_from_u64(5);
        let (mut game, _rx) = WordSearch::with_channel(&layout, &mut rng).unwrap();

        assert!(game.select_word("BA"));
        let found = drag(&mut game, (0, 0), (0, 1)).unwrap();

        assert_eq!(found.word, "BA");
        assert_eq!(found.digit_cell, Position::new(0, 1));
        assert_eq!(found.digit, '2');
        assert_eq!(game.active_word(), None);
        assert!(!game.select_word("BA"));
        assert!(!game.select_word("NOPE"));
    }

    #[test]
    fn test_words_crossing_a_digit_cell_stay_findable() {
        let layout = PuzzleLayout {
            size: 5,
            words: vec!["DATA".to_string(), "TAG".to_string()],
            placements: vec![
                Placement::new("DATA", 0, 0, Direction::RIGHT),
                Placement::new("TAG", 0, 2, Direction::DOWN),
            ],
        };
        let mut rng = StdRng::seed_from_u64(11);
        let (mut game, mut rx) = WordSearch::with_channel(&layout, &mut rng).unwrap();

        let tag = drag(&mut game, (0, 2), (2, 2)).unwrap();
        assert_eq!(tag.digit, '0');
        assert_eq!(game.shown_at(Position::new(0, 2)), Some('0'));

        // DATA runs through the cell that now shows TAG's digit
        let data = drag(&mut game, (0, 0), (0, 3)).unwrap();
        assert_eq!(data.word, "DATA");
        assert_eq!(data.digit_cell, Position::new(0, 0));
        assert_eq!(game.rows()[0].chars().take(4).collect::<String>(), "4A0A");
        assert!(game.is_complete());

        let events = drain(&mut rx);
        assert_eq!(words_found(&events), vec!["TAG", "DATA"]);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::AllWordsFound).count(),
            1
        );
    }

    #[test]
    fn test_hovering_the_same_cell_emits_once() {
        let (mut game, mut rx) = board();

        game.pointer_down(Position::new(1, 1));
        game.pointer_move(Position::new(1, 4));
        game.pointer_move(Position::new(1, 4));
        game.pointer_move(Position::new(1, 4));

        let changes = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CellSelectionChanged { .. }))
            .count();
        assert_eq!(changes, 1);

        game.pointer_move(Position::new(1, 5));
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[test]
    fn test_code_check() {
        let (game, _rx) = board();

        assert_eq!(game.expected_code(), "3542");
        assert!(game.check_code("3542"));
        assert!(game.check_code(" 3-5-4-2 "));
        assert!(!game.check_code("2453"));
        assert!(!game.check_code(""));
    }

    #[test]
    fn test_invalid_layout_fails_construction() {
        let layout = PuzzleLayout {
            size: 3,
            words: vec!["LOGIC".to_string()],
            placements: vec![Placement::new("LOGIC", 0, 0, Direction::RIGHT)],
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(WordSearch::with_channel(&layout, &mut rng).is_err());
    }
}
