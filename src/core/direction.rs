//! Move directions and the axis/order they imply.
//!
//! Every direction reduces to two parameters: the `Axis` tiles travel along
//! and whether the leading edge is the low (0) or high (`GRID_SIZE - 1`)
//! end of that axis. Move resolution is written once against these two
//! parameters instead of once per direction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::position::GRID_SIZE;

/// Axis of travel for a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Tiles travel along a row (LEFT/RIGHT); lanes are rows.
    Horizontal,
    /// Tiles travel along a column (UP/DOWN); lanes are columns.
    Vertical,
}

/// One of the four canonical move directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Axis tiles travel along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// True if tiles travel toward coordinate 0.
    #[must_use]
    pub const fn toward_origin(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }

    /// Coordinate of the leading edge along the axis of travel.
    #[must_use]
    pub const fn leading_edge(self) -> u8 {
        if self.toward_origin() {
            0
        } else {
            (GRID_SIZE - 1) as u8
        }
    }

    /// One step away from the leading edge, starting at `coord`.
    ///
    /// Callers never step past the trailing edge: a lane holds at most
    /// `GRID_SIZE` tiles.
    #[must_use]
    pub const fn step_back(self, coord: u8) -> u8 {
        if self.toward_origin() {
            coord + 1
        } else {
            coord - 1
        }
    }

    /// Distance of `coord` from the leading edge.
    #[must_use]
    pub const fn distance_from_edge(self, coord: u8) -> u8 {
        if self.toward_origin() {
            coord
        } else {
            (GRID_SIZE - 1) as u8 - coord
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Parse a direction name (`up`, `Down`, ...) or a DOM arrow key code
    /// (`ArrowUp`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed
            .strip_prefix("Arrow")
            .unwrap_or(trimmed)
            .to_ascii_lowercase();
        match name.as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}
