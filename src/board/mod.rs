//! Board engine: the tile collection and move resolution.
//!
//! `Board` owns the tiles; `resolver` holds the pure algorithm that turns
//! a set of tiles and a direction into a `MovePlan`, and the `settle` step
//! that commits one.

pub mod grid;
pub mod resolver;

pub use grid::{check_tiles, Board, EmptyCells};
pub use resolver::{resolve_move, settle, Merge, MovePlan, TileTransition};
