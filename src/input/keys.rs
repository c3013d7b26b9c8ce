//! Keyboard input.

use crate::core::{Direction, GameError, GameResult};

/// Direction bound to a DOM-style key code (`ArrowUp`, ...), if any.
///
/// Keys other than the four arrows are not moves and map to `None`.
#[must_use]
pub fn direction_for_key(code: &str) -> Option<Direction> {
    match code {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Like `direction_for_key`, but reports unbound keys as `InvalidDirection`.
pub fn parse_key(code: &str) -> GameResult<Direction> {
    direction_for_key(code).ok_or_else(|| GameError::InvalidDirection(code.to_string()))
}
