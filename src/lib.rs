//! Eco Snake - a snake game whose collectibles carry environmental messages
//!
//! This library provides:
//! - Core game logic (game module): tick state machine, collisions, weighted food spawning
//! - TUI rendering (render module)
//! - Keyboard and mouse-swipe input (input module)
//! - Session statistics (metrics module)
//! - The interactive play mode and its tick scheduler (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
