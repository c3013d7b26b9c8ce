//! Touch gesture decoding.
//!
//! A swipe is reduced to its displacement. The axis with the larger
//! magnitude wins (vertical on a tie), and the swipe only counts if that
//! magnitude reaches the threshold. Screen coordinates grow rightward and
//! downward.

use serde::{Deserialize, Serialize};

use crate::core::Direction;

/// Displacement between touch start and touch end, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub dx: f32,
    pub dy: f32,
}

impl Swipe {
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Swipe from a start point to an end point.
    #[must_use]
    pub fn between(start: (f32, f32), end: (f32, f32)) -> Self {
        Self::new(end.0 - start.0, end.1 - start.1)
    }

    /// Direction of this swipe, or `None` if it is shorter than `threshold`.
    #[must_use]
    pub fn direction(&self, threshold: f32) -> Option<Direction> {
        let (ax, ay) = (self.dx.abs(), self.dy.abs());
        if ax.is_nan() || ay.is_nan() {
            return None;
        }

        if ax > ay {
            if ax < threshold {
                return None;
            }
            Some(if self.dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            if ay < threshold || ay == 0.0 {
                return None;
            }
            Some(if self.dy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}
