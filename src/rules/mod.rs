//! Terminal-state rules.
//!
//! Win and loss are judged from settled tile positions only; nothing here
//! simulates a move.

pub mod terminal;

pub use terminal::{has_available_merge, has_winning_tile, is_stuck};
