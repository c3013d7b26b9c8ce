//! Core types: positions, directions, tiles, RNG, configuration, errors.
//!
//! Everything here is independent of move resolution and session state.

pub mod position;
pub mod direction;
pub mod tile;
pub mod rng;
pub mod config;
pub mod error;

pub use position::{Position, CELL_COUNT, GRID_SIZE};
pub use direction::{Axis, Direction};
pub use tile::{Tile, MAX_TILE_VALUE};
pub use rng::{GameRng, GameRngState, SpawnRng};
pub use config::GameConfig;
pub use error::{GameError, GameResult, StoreError};
