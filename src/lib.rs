//! # tile-merge
//!
//! Engine for the 4×4 sliding-tile merge puzzle (the 2048 rules).
//!
//! ## Design Principles
//!
//! 1. **Pure move resolution**: `board::resolve_move` reads tiles and a
//!    direction and returns a `MovePlan`. Positions and values change only
//!    when the plan is settled, so a renderer can animate in between.
//!
//! 2. **One algorithm for four directions**: a direction is an axis plus a
//!    leading edge; lanes are resolved the same way for all of them.
//!
//! 3. **Injected collaborators**: randomness (`SpawnRng`) and best-score
//!    persistence (`ScoreStore`) are passed to the `Session`, never global.
//!
//! ## Modules
//!
//! - `core`: positions, directions, tiles, RNG, configuration, errors
//! - `board`: tile collection and move resolution
//! - `rules`: win and game-over detection
//! - `session`: scoring, spawning, lifecycle, persistence, snapshots
//! - `input`: key and swipe adapters
//!
//! ## Example
//!
//! ```
//! use tile_merge::{Direction, Session};
//!
//! let mut session = Session::with_seed(42).unwrap();
//! for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     session.play(direction).unwrap();
//! }
//! assert!(session.best_score() >= session.score());
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod session;
pub mod input;

// Re-export commonly used types
pub use crate::core::{
    Axis, Direction, GameConfig, GameError, GameResult, GameRng, GameRngState, Position,
    SpawnRng, StoreError, Tile, CELL_COUNT, GRID_SIZE, MAX_TILE_VALUE,
};

pub use crate::board::{resolve_move, settle, Board, Merge, MovePlan, TileTransition};

pub use crate::rules::{has_available_merge, has_winning_tile, is_stuck};

pub use crate::session::{
    JsonFileStore, MemoryStore, MoveReport, ScoreStore, Session, SessionSnapshot,
};

pub use crate::input::{direction_for_key, parse_key, Swipe};
