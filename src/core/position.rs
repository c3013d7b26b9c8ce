//! Grid coordinates.
//!
//! The board is a fixed 4×4 grid. A `Position` is a `(col, row)` pair with
//! both components in `0..GRID_SIZE`; column 0 is the left edge and row 0
//! the top edge.
//!
//! ```
//! use tile_merge::core::{Position, GRID_SIZE};
//!
//! let pos = Position::new(3, 0);
//! assert_eq!(pos.col, 3);
//! assert_eq!(pos.index(), 3);
//! assert_eq!(Position::from_index(GRID_SIZE * GRID_SIZE - 1), Position::new(3, 3));
//! ```

use serde::{Deserialize, Serialize};

use super::direction::Axis;

/// Width and height of the board.
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A cell on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    #[must_use]
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Position for a row-major cell index (`row * GRID_SIZE + col`).
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self {
            col: (index % GRID_SIZE) as u8,
            row: (index / GRID_SIZE) as u8,
        }
    }

    /// Row-major cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * GRID_SIZE + self.col as usize
    }

    /// Check that both coordinates lie on the grid.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        (self.col as usize) < GRID_SIZE && (self.row as usize) < GRID_SIZE
    }

    /// Coordinate along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> u8 {
        match axis {
            Axis::Horizontal => self.col,
            Axis::Vertical => self.row,
        }
    }

    /// Coordinate across `axis` (the lane this position belongs to).
    #[must_use]
    pub const fn across(self, axis: Axis) -> u8 {
        match axis {
            Axis::Horizontal => self.row,
            Axis::Vertical => self.col,
        }
    }

    /// Copy of this position with the coordinate along `axis` replaced.
    #[must_use]
    pub const fn with_along(self, axis: Axis, value: u8) -> Self {
        match axis {
            Axis::Horizontal => Self { col: value, row: self.row },
            Axis::Vertical => Self { col: self.col, row: value },
        }
    }

    /// Iterate over every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position::from_index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}
