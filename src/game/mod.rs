// Word search engine modules

pub mod engine;
pub mod events;
pub mod grid;
pub mod selection;
pub mod validator;

pub use engine::WordSearch;
pub use events::{FoundWord, GameEvent};
pub use grid::GridGenerator;
