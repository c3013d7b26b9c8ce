//! Input adapters: raw key codes and swipe gestures to `Direction`.

pub mod keys;
pub mod swipe;

pub use keys::{direction_for_key, parse_key};
pub use swipe::Swipe;
