//! Settled tiles.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Largest tile a 4×4 board can hold (2^17).
pub const MAX_TILE_VALUE: u32 = 1 << 17;

/// A numbered tile resting on a cell.
///
/// Tiles are plain values. Moving a tile never mutates it: the resolver
/// describes the move as a `TileTransition` and settling produces fresh
/// tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub position: Position,
    pub value: u32,
}

impl Tile {
    #[must_use]
    pub const fn new(position: Position, value: u32) -> Self {
        Self { position, value }
    }

    /// Shorthand for `Tile::new(Position::new(col, row), value)`.
    #[must_use]
    pub const fn at(col: u8, row: u8, value: u32) -> Self {
        Self::new(Position::new(col, row), value)
    }

    /// True if `value` is a power of two in `2..=MAX_TILE_VALUE`.
    #[must_use]
    pub const fn has_valid_value(&self) -> bool {
        self.value >= 2 && self.value <= MAX_TILE_VALUE && self.value.is_power_of_two()
    }
}
