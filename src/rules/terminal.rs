//! Win and game-over detection.
//!
//! A board is stuck when every cell is filled and no row or column holds
//! two neighbouring tiles of equal value. Neighbours are consecutive tiles
//! within a lane; on a full board that is the same as grid adjacency.
//!
//! This is an adjacency test, not a search: it answers "would any single
//! move merge something", which on a full board is exactly "can any move
//! change the board".

use crate::board::Board;
use crate::core::{Axis, GRID_SIZE, MAX_TILE_VALUE};

/// Check if any row or column has two consecutive tiles of equal value
/// that are still allowed to merge.
#[must_use]
pub fn has_available_merge(board: &Board) -> bool {
    let grid = board.grid();
    [Axis::Horizontal, Axis::Vertical].into_iter().any(|axis| {
        (0..GRID_SIZE).any(|lane| {
            let mut previous: Option<u32> = None;
            for step in 0..GRID_SIZE {
                let (row, col) = match axis {
                    Axis::Horizontal => (lane, step),
                    Axis::Vertical => (step, lane),
                };
                if let Some(value) = grid[row][col] {
                    if previous == Some(value) && value < MAX_TILE_VALUE {
                        return true;
                    }
                    previous = Some(value);
                }
            }
            false
        })
    })
}

/// True if the board is full and no move can merge anything.
#[must_use]
pub fn is_stuck(board: &Board) -> bool {
    board.is_full() && !has_available_merge(board)
}

/// True if any tile has reached `win_value`.
#[must_use]
pub fn has_winning_tile(board: &Board, win_value: u32) -> bool {
    board.tiles().iter().any(|t| t.value >= win_value)
}
