//! Game session: scoring, spawning, win/loss, and lifecycle.
//!
//! `Session` is the only mutator of its `Board`. A move runs as:
//!
//! 1. `begin_move`: resolve the move and hold the plan as pending. A move
//!    that changes nothing is dropped here with no side effects.
//! 2. `complete_move`: settle the plan, add the score delta, spawn a tile,
//!    and re-evaluate win/game-over.
//!
//! `play` runs both phases back to back. Presentation layers that animate
//! call them separately and render `pending()` in between; any move
//! attempted before `complete_move` fails with `MoveInProgress`.

use tracing::{debug, info, warn};

use crate::board::{Board, MovePlan};
use crate::core::{Direction, GameConfig, GameError, GameResult, GameRng, SpawnRng, Tile};
use crate::input::{parse_key, Swipe};
use crate::rules::{has_winning_tile, is_stuck};

use super::snapshot::SessionSnapshot;
use super::store::{MemoryStore, ScoreStore};

/// What a completed move did.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveReport {
    /// Resolved move: pre-move tiles with their targets and merge roles.
    pub plan: MovePlan,
    /// Tile spawned after the move, if the board had room.
    pub spawned: Option<Tile>,
}

impl MoveReport {
    /// Points scored by this move.
    #[must_use]
    pub fn score_delta(&self) -> u32 {
        self.plan.score_delta
    }
}

/// A single game instance.
///
/// Generic over the random source and the best-score store so both can be
/// scripted in tests.
pub struct Session<R: SpawnRng = GameRng, S: ScoreStore = MemoryStore> {
    config: GameConfig,
    board: Board,
    rng: R,
    store: S,
    score: u64,
    best_score: u64,
    game_over: bool,
    has_won: bool,
    kept_playing: bool,
    last_direction: Option<Direction>,
}

impl Session<GameRng, MemoryStore> {
    /// Session with standard rules, a seeded RNG, and an in-memory store.
    pub fn with_seed(seed: u64) -> GameResult<Self> {
        Self::new(GameConfig::default(), GameRng::new(seed), MemoryStore::new())
    }
}

impl<S: ScoreStore> Session<GameRng, S> {
    /// Resume a saved game.
    ///
    /// The RNG continues from the snapshot's checkpoint when it has one and
    /// is seeded from the OS otherwise.
    pub fn from_snapshot(config: GameConfig, snapshot: &SessionSnapshot, store: S) -> GameResult<Self> {
        let rng = snapshot
            .rng
            .as_ref()
            .map_or_else(GameRng::from_entropy, GameRng::from_state);
        let mut session = Self::assemble(config, rng, store)?;
        session.restore(snapshot)?;
        Ok(session)
    }
}

impl<R: SpawnRng, S: ScoreStore> Session<R, S> {
    /// Create a session and start a fresh game.
    ///
    /// The best score is read from `store` once, here. A failed read is
    /// logged and treated as no best score.
    pub fn new(config: GameConfig, rng: R, store: S) -> GameResult<Self> {
        let mut session = Self::assemble(config, rng, store)?;
        session.reset()?;
        Ok(session)
    }

    /// Validated session with an empty board and the stored best score.
    fn assemble(config: GameConfig, rng: R, store: S) -> GameResult<Self> {
        config.validate()?;

        let best_score = match store.get(&config.best_score_key) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                warn!(key = %config.best_score_key, error = %e, "failed to read best score");
                0
            }
        };

        Ok(Self {
            config,
            board: Board::new(),
            rng,
            store,
            score: 0,
            best_score,
            game_over: false,
            has_won: false,
            kept_playing: false,
            last_direction: None,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Settled tiles.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        self.board.tiles()
    }

    /// Move begun but not yet completed.
    #[must_use]
    pub fn pending(&self) -> Option<&MovePlan> {
        self.board.pending()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True once any tile has reached the win value. Cleared only by `reset`.
    #[must_use]
    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// True if the game is won and the player has not chosen to keep playing.
    #[must_use]
    pub fn should_display_win_overlay(&self) -> bool {
        self.has_won && !self.kept_playing
    }

    #[must_use]
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // === Lifecycle ===

    /// Start a new game: clear the board (dropping any move in flight),
    /// spawn the starting tiles, zero the score. The best score is kept.
    pub fn reset(&mut self) -> GameResult<()> {
        self.board.clear();
        self.score = 0;
        self.game_over = false;
        self.has_won = false;
        self.kept_playing = false;
        self.last_direction = None;

        for _ in 0..self.config.starting_tiles {
            self.spawn_tile()?;
        }
        self.update_terminal_state();

        info!(best_score = self.best_score, tiles = self.board.len(), "new game");
        Ok(())
    }

    /// Dismiss the win overlay and continue the current game.
    pub fn keep_playing(&mut self) {
        if self.has_won {
            self.kept_playing = true;
        }
    }

    // === Moves ===

    /// Resolve a move and hold it as pending.
    ///
    /// Returns `Ok(None)` without side effects when the game is over or the
    /// move would change nothing. Fails with `MoveInProgress` if a previous
    /// move has not been completed.
    pub fn begin_move(&mut self, direction: Direction) -> GameResult<Option<&MovePlan>> {
        if self.board.pending().is_some() {
            return Err(GameError::MoveInProgress);
        }
        if self.game_over {
            debug!(%direction, "move ignored: game over");
            return Ok(None);
        }

        let plan = self.board.plan_move(direction);
        if !plan.moved() {
            debug!(%direction, "move changes nothing");
            self.update_terminal_state();
            return Ok(None);
        }

        debug!(
            %direction,
            merges = plan.merge_count(),
            score_delta = plan.score_delta,
            "move resolved"
        );
        self.last_direction = Some(direction);
        self.board.stage(plan).map(Some)
    }

    /// Settle the pending move, score it, spawn a tile, and update the
    /// win/game-over flags.
    pub fn complete_move(&mut self) -> GameResult<MoveReport> {
        let plan = self.board.settle().ok_or(GameError::NoPendingMove)?;
        if cfg!(debug_assertions) {
            self.board.check_invariants()?;
        }

        self.add_score(u64::from(plan.score_delta));
        let spawned = self.spawn_tile()?;
        self.update_terminal_state();

        Ok(MoveReport { plan, spawned })
    }

    /// Run a whole move. Returns `Ok(None)` if the move was ignored.
    pub fn play(&mut self, direction: Direction) -> GameResult<Option<MoveReport>> {
        if self.begin_move(direction)?.is_none() {
            return Ok(None);
        }
        self.complete_move().map(Some)
    }

    /// Play the move bound to a key code. Unbound keys fail with
    /// `InvalidDirection` and change nothing.
    pub fn play_key(&mut self, code: &str) -> GameResult<Option<MoveReport>> {
        let direction = parse_key(code)?;
        self.play(direction)
    }

    /// Play a swipe gesture. Swipes shorter than the configured threshold
    /// are ignored.
    pub fn play_swipe(&mut self, swipe: Swipe) -> GameResult<Option<MoveReport>> {
        match swipe.direction(self.config.swipe_threshold) {
            Some(direction) => self.play(direction),
            None => Ok(None),
        }
    }

    // === Snapshots ===

    /// Capture the settled state. A move in flight is not included.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tiles: self.board.tiles().to_vec(),
            score: self.score,
            has_won: self.has_won,
            kept_playing: self.kept_playing,
            last_direction: self.last_direction,
            rng: self.rng.checkpoint(),
        }
    }

    /// Replace the current game with a saved one.
    ///
    /// The snapshot's RNG state is not applied here; see
    /// `Session::from_snapshot`. Fails without changing anything if the
    /// snapshot's tiles break the board invariants.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> GameResult<()> {
        self.board = Board::from_tiles(snapshot.tiles.iter().copied())?;
        self.score = snapshot.score;
        self.has_won = snapshot.has_won;
        self.kept_playing = snapshot.kept_playing;
        self.last_direction = snapshot.last_direction;
        self.game_over = false;
        if self.score > self.best_score {
            self.record_best_score();
        }
        self.update_terminal_state();
        Ok(())
    }

    // === Internals ===

    /// Place a 2 (or, with the configured probability, a 4) on a uniformly
    /// chosen empty cell. A full board is not an error: nothing spawns.
    fn spawn_tile(&mut self) -> GameResult<Option<Tile>> {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            debug!("board full, no spawn");
            return Ok(None);
        }

        let cell = empty[self.rng.cell_index(empty.len()).min(empty.len() - 1)];
        let value = if self.rng.spawn_four(self.config.four_probability) { 4 } else { 2 };
        let tile = Tile::new(cell, value);
        self.board.insert(tile)?;

        debug!(position = %cell, value, "spawned tile");
        Ok(Some(tile))
    }

    fn add_score(&mut self, delta: u64) {
        if delta == 0 {
            return;
        }
        self.score += delta;
        if self.score > self.best_score {
            self.record_best_score();
        }
    }

    /// Raise the best score to the current score and persist it. A failed
    /// write is logged and dropped.
    fn record_best_score(&mut self) {
        self.best_score = self.score;
        if let Err(e) = self.store.set(&self.config.best_score_key, self.best_score) {
            warn!(key = %self.config.best_score_key, error = %e, "failed to write best score");
        }
    }

    fn update_terminal_state(&mut self) {
        if !self.has_won && has_winning_tile(&self.board, self.config.win_value) {
            self.has_won = true;
            info!(score = self.score, "win tile reached");
        }

        let stuck = is_stuck(&self.board);
        if stuck && !self.game_over {
            info!(score = self.score, best_score = self.best_score, "game over");
        }
        self.game_over = stuck;
    }
}

impl<R: SpawnRng, S: ScoreStore> std::fmt::Debug for Session<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("board", &self.board)
            .field("score", &self.score)
            .field("best_score", &self.best_score)
            .field("game_over", &self.game_over)
            .field("has_won", &self.has_won)
            .field("kept_playing", &self.kept_playing)
            .field("last_direction", &self.last_direction)
            .finish_non_exhaustive()
    }
}
