pub mod game;

pub use game::{
    // Layout
    Direction, Placement, PuzzleLayout,
    // Grid types
    CellMark, Grid, GridCell, Position, WordEntry,
};
