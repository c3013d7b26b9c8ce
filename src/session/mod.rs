//! Game session: wraps a `Board` with scoring, spawning, terminal
//! detection, persistence, and snapshots.

pub mod game;
pub mod snapshot;
pub mod store;

pub use game::{MoveReport, Session};
pub use snapshot::SessionSnapshot;
pub use store::{JsonFileStore, MemoryStore, ScoreStore};
