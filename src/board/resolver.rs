//! Move resolution.
//!
//! A move is resolved in two phases:
//!
//! 1. `resolve_move` reads the settled tiles and produces a `MovePlan`: one
//!    `TileTransition` per tile recording where it starts, where it ends,
//!    and what role it plays in a merge. Nothing is mutated.
//! 2. `settle` turns a plan into the next set of settled tiles.
//!
//! Keeping the phases apart lets a presentation layer animate from each
//! transition's `source` to its `target` before the board commits.
//!
//! ## Lanes
//!
//! All four directions run through the same code. Tiles are ordered with
//! the tile nearest the leading edge first (ties broken by cross-axis
//! coordinate) and grouped into lanes: rows for LEFT/RIGHT, columns for
//! UP/DOWN. Each lane is walked once:
//!
//! - the first tile targets the leading edge;
//! - a tile equal in value to the lane's last survivor, if that survivor
//!   has not merged yet this move, is removed and shares its target;
//! - any other tile targets one step behind the last survivor.
//!
//! Because the last survivor's target is also the target of any tile that
//! merged into it, "one step behind the survivor" is the same cell as "one
//! step behind the removed tile", which closes the gap a merge leaves.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::check_tiles;
use crate::core::{Direction, GameResult, Position, Tile, GRID_SIZE, MAX_TILE_VALUE};

/// Role a tile plays in a merge during one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Merge {
    /// Tile slides (or stays) and keeps its value.
    None,
    /// Tile absorbs its trailing partner and ends with `value`.
    Survivor { value: u32 },
    /// Tile slides into its partner and is removed on settle.
    Removed,
}

/// Where one tile goes during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileTransition {
    /// Tile as it was before the move.
    pub source: Tile,
    /// Cell the tile ends on (or disappears into).
    pub target: Position,
    pub merge: Merge,
}

impl TileTransition {
    /// A transition that leaves `tile` where it is.
    #[must_use]
    pub const fn stationary(tile: Tile) -> Self {
        Self {
            source: tile,
            target: tile.position,
            merge: Merge::None,
        }
    }

    /// Value to apply once the move settles, if the tile merged.
    #[must_use]
    pub const fn pending_value(&self) -> Option<u32> {
        match self.merge {
            Merge::Survivor { value } => Some(value),
            _ => None,
        }
    }

    /// True if this tile disappears on settle.
    #[must_use]
    pub const fn marked_for_removal(&self) -> bool {
        matches!(self.merge, Merge::Removed)
    }

    /// True if the tile changes cell.
    #[must_use]
    pub fn moves(&self) -> bool {
        self.target != self.source.position
    }

    /// Tile left behind after settling, or `None` if it was merged away.
    #[must_use]
    pub fn settled(&self) -> Option<Tile> {
        match self.merge {
            Merge::Removed => None,
            Merge::Survivor { value } => Some(Tile::new(self.target, value)),
            Merge::None => Some(Tile::new(self.target, self.source.value)),
        }
    }
}

/// Outcome of resolving a move against a set of tiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovePlan {
    pub direction: Direction,
    /// One transition per input tile, in the input order.
    pub transitions: Vec<TileTransition>,
    /// Sum of the values produced by merges.
    pub score_delta: u32,
}

impl MovePlan {
    /// True if any tile changes cell. A plan that moves nothing must not
    /// spawn a tile or change the score.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.transitions.iter().any(TileTransition::moves)
    }

    /// Number of merges in this move.
    #[must_use]
    pub fn merge_count(&self) -> usize {
        self.transitions.iter().filter(|t| t.marked_for_removal()).count()
    }
}

/// Last surviving tile in the lane being walked.
#[derive(Clone, Copy)]
struct LaneHead {
    index: usize,
    target: u8,
    value: u32,
    merged: bool,
}

/// Resolve a move of `tiles` toward `direction`.
///
/// Fails with `InvariantViolation` if `tiles` could not form a board
/// (shared or off-grid cells, invalid values, more than 16 tiles).
/// Neither positions nor values of the input change; the plan carries the
/// new state.
pub fn resolve_move(tiles: &[Tile], direction: Direction) -> GameResult<MovePlan> {
    check_tiles(tiles)?;
    Ok(resolve_lanes(tiles, direction))
}

/// Lane walk over tiles already known to satisfy the board invariants.
///
/// Tiles at `MAX_TILE_VALUE` do not merge with each other.
pub(crate) fn resolve_lanes(tiles: &[Tile], direction: Direction) -> MovePlan {
    let axis = direction.axis();
    let mut transitions: Vec<TileTransition> =
        tiles.iter().copied().map(TileTransition::stationary).collect();
    let mut score_delta = 0u32;

    // Traversal order: nearest the leading edge first, then cross-axis.
    let mut order: SmallVec<[usize; 16]> = (0..tiles.len()).collect();
    order.sort_by_key(|&i| {
        let pos = tiles[i].position;
        (direction.distance_from_edge(pos.along(axis)), pos.across(axis))
    });

    for lane in 0..GRID_SIZE as u8 {
        let mut head: Option<LaneHead> = None;

        for &i in order.iter().filter(|&&i| tiles[i].position.across(axis) == lane) {
            let tile = tiles[i];
            let along = match head {
                None => direction.leading_edge(),
                Some(mut prev)
                    if prev.value == tile.value && !prev.merged && prev.value < MAX_TILE_VALUE =>
                {
                    let merged_value = tile.value * 2;
                    transitions[prev.index].merge = Merge::Survivor { value: merged_value };
                    transitions[i].merge = Merge::Removed;
                    transitions[i].target = tile.position.with_along(axis, prev.target);
                    score_delta += merged_value;
                    prev.merged = true;
                    head = Some(prev);
                    continue;
                }
                Some(prev) => direction.step_back(prev.target),
            };

            transitions[i].target = tile.position.with_along(axis, along);
            head = Some(LaneHead {
                index: i,
                target: along,
                value: tile.value,
                merged: false,
            });
        }
    }

    MovePlan {
        direction,
        transitions,
        score_delta,
    }
}

/// Settled tiles after applying `plan`: merged values applied, removed
/// tiles dropped, every survivor on its target. Input order is preserved.
#[must_use]
pub fn settle(plan: &MovePlan) -> Vec<Tile> {
    plan.transitions.iter().filter_map(TileTransition::settled).collect()
}
