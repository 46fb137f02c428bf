use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::GameError;
use super::state::MIN_SNAKE_LENGTH;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Nominal period between ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Probability that a freshly spawned item is positive
    pub positive_probability: f64,
    /// Random placement draws before falling back to scanning free cells
    pub max_spawn_attempts: usize,
    /// How long the presentation layer shows a collected item's message
    pub message_duration_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tick_interval_ms: 150,
            positive_probability: 0.6,
            max_spawn_attempts: 256,
            message_duration_ms: 3000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_duration_ms)
    }

    /// Check that every value is in range
    pub fn validate(&self) -> Result<(), GameError> {
        validate_grid(self.grid_width, self.grid_height)?;

        if !(0.0..=1.0).contains(&self.positive_probability) {
            return Err(GameError::InvalidConfig(format!(
                "positive_probability must be in [0, 1], got {}",
                self.positive_probability
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }

        if self.max_spawn_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "max_spawn_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// A grid must fit the horizontal starting snake and leave one cell for food
pub fn validate_grid(width: usize, height: usize) -> Result<(), GameError> {
    let fits_snake = width >= MIN_SNAKE_LENGTH && height >= 1;
    let has_free_cell = width.saturating_mul(height) > MIN_SNAKE_LENGTH;
    let addressable = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();

    if fits_snake && has_free_cell && addressable {
        Ok(())
    } else {
        Err(GameError::InvalidGrid { width, height })
    }
}
