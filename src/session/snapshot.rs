//! Serializable session state for save/resume.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, GameError, GameResult, GameRngState, Tile};

/// Everything needed to resume a game, minus the best score (which lives
/// in the score store) and any move still in flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tiles: Vec<Tile>,
    pub score: u64,
    pub has_won: bool,
    pub kept_playing: bool,
    pub last_direction: Option<Direction>,
    /// RNG state, if the session's random source supports checkpoints.
    pub rng: Option<GameRngState>,
}

impl SessionSnapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> GameResult<String> {
        serde_json::to_string(self).map_err(|e| GameError::Store(e.into()))
    }

    /// Decode from JSON.
    pub fn from_json(text: &str) -> GameResult<Self> {
        serde_json::from_str(text).map_err(|e| GameError::Store(e.into()))
    }
}
