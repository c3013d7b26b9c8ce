//! Error types.

use thiserror::Error;

/// Errors raised by the board, session, and input adapters.
#[derive(Debug, Error)]
pub enum GameError {
    /// Input did not name one of the four directions.
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    /// Board or configuration broke a structural rule.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A move was started while a previous one is still unsettled.
    #[error("a move is already in progress")]
    MoveInProgress,

    /// `complete_move` was called with nothing pending.
    #[error("no move is pending")]
    NoPendingMove,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures from a best-score store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
