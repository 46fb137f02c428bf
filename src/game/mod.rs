//! Core game logic module
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The presentation layer drives it: one `advance` per tick plus discrete
//! direction and start/pause/restart commands.

pub mod action;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use catalog::{Category, ItemCatalog, ItemDefinition, MAX_ITEM_POINTS};
pub use config::GameConfig;
pub use engine::{GameEngine, Restarted, TickResult};
pub use error::GameError;
pub use state::{
    CollectedItem, CollisionType, Food, GameState, MIN_SNAKE_LENGTH, PauseState, Phase, Position,
    Snake,
};
