use crate::models::Position;

/// In-progress drag: where the pointer went down and where it is now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub current: Position,
}

impl Selection {
    pub fn new(anchor: Position) -> Self {
        Self {
            anchor,
            current: anchor,
        }
    }

    /// Cells from the anchor to `to`, in drag order.
    /// `None` unless both share a row or a column.
    pub fn run_to(&self, to: Position) -> Option<Vec<Position>> {
        run_between(self.anchor, to)
    }
}

/// Straight-line run between two cells, inclusive, ordered from `from` to `to`
pub fn run_between(from: Position, to: Position) -> Option<Vec<Position>> {
    if from.row == to.row {
        Some(
            steps(from.col, to.col)
                .into_iter()
                .map(|col| Position::new(from.row, col))
                .collect(),
        )
    } else if from.col == to.col {
        Some(
            steps(from.row, to.row)
                .into_iter()
                .map(|row| Position::new(row, from.col))
                .collect(),
        )
    } else {
        None
    }
}

fn steps(from: usize, to: usize) -> Vec<usize> {
    if from <= to {
        (from..=to).collect()
    } else {
        (to..=from).rev().collect()
    }
}
