//! Game configuration.
//!
//! The grid is always 4×4. What can be tuned is the rule surface around
//! it: the winning tile, the spawn odds, how many tiles a fresh game starts
//! with, where the best score is stored, and the swipe sensitivity.

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use super::position::CELL_COUNT;
use super::tile::MAX_TILE_VALUE;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tile value that wins the game.
    pub win_value: u32,

    /// Probability that a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,

    /// Tiles spawned by `reset()`.
    pub starting_tiles: usize,

    /// Key the best score is stored under.
    pub best_score_key: String,

    /// Minimum swipe displacement, in pixels, that counts as a move.
    pub swipe_threshold: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_value: 2048,
            four_probability: 0.1,
            starting_tiles: 2,
            best_score_key: "bestScore".to_string(),
            swipe_threshold: 30.0,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_win_value(mut self, value: u32) -> Self {
        self.win_value = value;
        self
    }

    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability;
        self
    }

    #[must_use]
    pub fn with_starting_tiles(mut self, count: usize) -> Self {
        self.starting_tiles = count;
        self
    }

    #[must_use]
    pub fn with_best_score_key(mut self, key: impl Into<String>) -> Self {
        self.best_score_key = key.into();
        self
    }

    #[must_use]
    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Check the configuration for values the rules cannot honor.
    pub fn validate(&self) -> GameResult<()> {
        if self.win_value < 4 || self.win_value > MAX_TILE_VALUE || !self.win_value.is_power_of_two() {
            return Err(GameError::InvariantViolation(format!(
                "win value {} is not a power of two in 4..={}",
                self.win_value, MAX_TILE_VALUE
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(GameError::InvariantViolation(format!(
                "four probability {} outside [0, 1]",
                self.four_probability
            )));
        }
        if self.starting_tiles > CELL_COUNT {
            return Err(GameError::InvariantViolation(format!(
                "{} starting tiles do not fit on {} cells",
                self.starting_tiles, CELL_COUNT
            )));
        }
        if self.swipe_threshold.is_nan() || self.swipe_threshold < 0.0 {
            return Err(GameError::InvariantViolation(format!(
                "swipe threshold {} must be non-negative",
                self.swipe_threshold
            )));
        }
        Ok(())
    }
}
