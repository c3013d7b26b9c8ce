//! The tile collection.
//!
//! `Board` owns the settled tiles in insertion order (not spatial order)
//! plus, between `begin` and `settle`, the plan for the move in flight.
//! Only settled tiles are ever observable through `tiles()`; a presentation
//! layer reads the in-flight plan through `pending()` to animate it.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::resolver::{self, MovePlan};
use crate::core::{Direction, GameError, GameResult, Position, Tile, CELL_COUNT, GRID_SIZE};

/// Free cells, sized so a full scan never allocates.
pub type EmptyCells = SmallVec<[Position; CELL_COUNT]>;

/// Ordered collection of up to 16 tiles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    tiles: Vec<Tile>,
    pending: Option<MovePlan>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from tiles, rejecting anything that breaks the
    /// board invariants.
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> GameResult<Self> {
        let board = Self {
            tiles: tiles.into_iter().collect(),
            pending: None,
        };
        board.check_invariants()?;
        Ok(board)
    }

    /// Settled tiles in insertion order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tiles.len() >= CELL_COUNT
    }

    /// Tile on `pos`, if any.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.position == pos)
    }

    /// Value on each cell, indexed `[row][col]`.
    #[must_use]
    pub fn grid(&self) -> [[Option<u32>; GRID_SIZE]; GRID_SIZE] {
        let mut grid = [[None; GRID_SIZE]; GRID_SIZE];
        for tile in &self.tiles {
            grid[tile.position.row as usize][tile.position.col as usize] = Some(tile.value);
        }
        grid
    }

    /// Unoccupied cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> EmptyCells {
        let mut occupied = [false; CELL_COUNT];
        for tile in &self.tiles {
            occupied[tile.position.index()] = true;
        }
        Position::all().filter(|p| !occupied[p.index()]).collect()
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.tiles.iter().map(|t| u64::from(t.value)).sum()
    }

    /// Largest tile value, or 0 on an empty board.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    /// Add a tile. Fails if the cell is taken or the value is invalid.
    pub fn insert(&mut self, tile: Tile) -> GameResult<()> {
        if !tile.position.in_bounds() {
            return Err(GameError::InvariantViolation(format!(
                "tile position {} is off the grid",
                tile.position
            )));
        }
        if !tile.has_valid_value() {
            return Err(GameError::InvariantViolation(format!(
                "tile value {} is not a power of two >= 2",
                tile.value
            )));
        }
        if self.tile_at(tile.position).is_some() {
            return Err(GameError::InvariantViolation(format!(
                "cell {} is already occupied",
                tile.position
            )));
        }
        self.tiles.push(tile);
        Ok(())
    }

    /// Remove every tile and drop any pending move.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.pending = None;
    }

    // === Moves ===

    /// Compute the plan for moving in `direction` without touching the board.
    #[must_use]
    pub fn plan_move(&self, direction: Direction) -> MovePlan {
        resolver::resolve_lanes(&self.tiles, direction)
    }

    /// Check if moving in `direction` would change anything.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        self.plan_move(direction).moved()
    }

    /// Resolve a move and hold it as pending until `settle`.
    ///
    /// Fails with `MoveInProgress` if a previous plan has not been settled.
    pub fn begin(&mut self, direction: Direction) -> GameResult<&MovePlan> {
        let plan = self.plan_move(direction);
        self.stage(plan)
    }

    /// Hold a plan from `plan_move` as pending until `settle`.
    ///
    /// Only plans computed by this crate from the current tiles reach here;
    /// the source check catches a plan computed before the tiles changed.
    pub(crate) fn stage(&mut self, plan: MovePlan) -> GameResult<&MovePlan> {
        if self.pending.is_some() {
            return Err(GameError::MoveInProgress);
        }
        if plan.transitions.len() != self.tiles.len()
            || plan.transitions.iter().zip(&self.tiles).any(|(t, tile)| t.source != *tile)
        {
            return Err(GameError::InvariantViolation(
                "plan was not computed from the current tiles".to_string(),
            ));
        }
        let plan: &MovePlan = self.pending.insert(plan);
        Ok(plan)
    }

    /// Plan currently in flight.
    #[must_use]
    pub fn pending(&self) -> Option<&MovePlan> {
        self.pending.as_ref()
    }

    /// Drop the pending plan without applying it.
    pub fn cancel(&mut self) -> Option<MovePlan> {
        self.pending.take()
    }

    /// Commit the pending plan, returning it.
    ///
    /// With nothing pending this is a no-op and returns `None`, so calling
    /// it twice in a row is harmless.
    pub fn settle(&mut self) -> Option<MovePlan> {
        let plan = self.pending.take()?;
        self.tiles = resolver::settle(&plan);
        Some(plan)
    }

    // === Invariants ===

    /// Verify tile count, coordinates, values, and position uniqueness.
    pub fn check_invariants(&self) -> GameResult<()> {
        check_tiles(&self.tiles)
    }
}

/// Verify that `tiles` could form a board: at most 16 tiles, all on the
/// grid, valid values, no shared cells.
pub fn check_tiles(tiles: &[Tile]) -> GameResult<()> {
    if tiles.len() > CELL_COUNT {
        return Err(GameError::InvariantViolation(format!(
            "{} tiles exceed {} cells",
            tiles.len(),
            CELL_COUNT
        )));
    }
    let mut seen = FxHashSet::default();
    for tile in tiles {
        if !tile.position.in_bounds() {
            return Err(GameError::InvariantViolation(format!(
                "tile position {} is off the grid",
                tile.position
            )));
        }
        if !tile.has_valid_value() {
            return Err(GameError::InvariantViolation(format!(
                "tile at {} has value {}",
                tile.position, tile.value
            )));
        }
        if !seen.insert(tile.position) {
            return Err(GameError::InvariantViolation(format!(
                "two tiles share {}",
                tile.position
            )));
        }
    }
    Ok(())
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.grid() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(v) => format!("{v:>5}"),
                    None => format!("{:>5}", "."),
                })
                .collect();
            writeln!(f, "{}", cells.join(""))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tiles_rejects_duplicates() {
        let err = Board::from_tiles([Tile::at(0, 0, 2), Tile::at(0, 0, 4)]).unwrap_err();
        assert!(matches!(err, GameError::InvariantViolation(_)));
    }

    #[test]
    fn test_from_tiles_rejects_bad_values_and_positions() {
        assert!(Board::from_tiles([Tile::at(0, 0, 3)]).is_err());
        assert!(Board::from_tiles([Tile::at(4, 0, 2)]).is_err());
    }

    #[test]
    fn test_empty_cells() {
        let board = Board::from_tiles([Tile::at(0, 0, 2), Tile::at(3, 3, 4)]).unwrap();
        let empty = board.empty_cells();
        assert_eq!(empty.len(), 14);
        assert!(!empty.contains(&Position::new(0, 0)));
        assert!(!empty.contains(&Position::new(3, 3)));
        assert_eq!(empty[0], Position::new(1, 0));
    }

    #[test]
    fn test_insert() {
        let mut board = Board::new();
        board.insert(Tile::at(1, 1, 2)).unwrap();
        assert_eq!(board.len(), 1);
        assert!(board.insert(Tile::at(1, 1, 4)).is_err());
        assert!(board.insert(Tile::at(2, 1, 5)).is_err());
        assert_eq!(board.tile_at(Position::new(1, 1)).map(|t| t.value), Some(2));
    }

    #[test]
    fn test_grid_and_totals() {
        let board = Board::from_tiles([Tile::at(2, 1, 8), Tile::at(0, 3, 2)]).unwrap();
        let grid = board.grid();
        assert_eq!(grid[1][2], Some(8));
        assert_eq!(grid[3][0], Some(2));
        assert_eq!(grid[0][0], None);
        assert_eq!(board.total_value(), 10);
        assert_eq!(board.max_value(), 8);
        assert_eq!(Board::new().max_value(), 0);
    }

    #[test]
    fn test_begin_settle_cycle() {
        let mut board = Board::from_tiles([Tile::at(1, 0, 2), Tile::at(2, 0, 2)]).unwrap();

        let plan = board.begin(Direction::Left).unwrap();
        assert!(plan.moved());
        // Settled tiles are untouched until settle
        assert_eq!(board.tiles(), &[Tile::at(1, 0, 2), Tile::at(2, 0, 2)]);

        assert!(matches!(board.begin(Direction::Right), Err(GameError::MoveInProgress)));

        assert!(board.settle().is_some());
        assert_eq!(board.tiles(), &[Tile::at(0, 0, 4)]);

        // Second settle is a no-op
        assert!(board.settle().is_none());
        assert_eq!(board.tiles(), &[Tile::at(0, 0, 4)]);
    }

    #[test]
    fn test_stage_rejects_foreign_plan() {
        let mut board = Board::from_tiles([Tile::at(3, 0, 2)]).unwrap();
        let other = Board::from_tiles([Tile::at(2, 2, 4)]).unwrap();
        let plan = other.plan_move(Direction::Left);
        assert!(matches!(board.stage(plan), Err(GameError::InvariantViolation(_))));
        assert!(board.pending().is_none());
    }

    #[test]
    fn test_cancel_discards_plan() {
        let mut board = Board::from_tiles([Tile::at(3, 0, 2)]).unwrap();
        board.begin(Direction::Left).unwrap();
        assert!(board.cancel().is_some());
        assert!(board.pending().is_none());
        assert_eq!(board.tiles(), &[Tile::at(3, 0, 2)]);
    }

    #[test]
    fn test_can_move() {
        let board = Board::from_tiles([Tile::at(0, 0, 2)]).unwrap();
        assert!(!board.can_move(Direction::Left));
        assert!(!board.can_move(Direction::Up));
        assert!(board.can_move(Direction::Right));
        assert!(board.can_move(Direction::Down));
    }

    #[test]
    fn test_display() {
        let board = Board::from_tiles([Tile::at(0, 0, 2), Tile::at(3, 3, 2048)]).unwrap();
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "    2    .    .    .");
        assert_eq!(lines[3], "    .    .    . 2048");
    }
}
