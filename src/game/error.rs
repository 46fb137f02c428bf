use thiserror::Error;

use super::catalog::Category;

/// Errors raised by the game core.
///
/// Ordinary gameplay input never produces one of these: reversing direction is
/// ignored and ticking a game that is not running is a no-op. Only construction
/// problems and a board with no free cell are reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Grid too small to hold the starting snake plus one food item
    #[error("invalid grid {width}x{height}: need width >= 3, height >= 1 and at least one free cell")]
    InvalidGrid { width: usize, height: usize },

    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An item definition breaks the catalog rules
    #[error("invalid item '{kind}': {reason}")]
    InvalidItem { kind: String, reason: String },

    /// The catalog has nothing to spawn for a category
    #[error("item catalog has no {0:?} items")]
    EmptyCatalog(Category),

    /// Every grid cell is covered by the snake, so food cannot be placed
    #[error("board is full: no free cell left for food")]
    BoardFull,
}
