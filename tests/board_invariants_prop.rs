//! Property tests for move resolution and settling.
//!
//! Boards are generated as 16 optional cells holding powers of two, then
//! every direction is checked against:
//! - settled tiles never share a cell;
//! - merges conserve value (score delta equals the merged values, tile sum
//!   is unchanged);
//! - settling twice is the same as settling once;
//! - a plan that moves nothing scores nothing and changes nothing.
use proptest::prelude::*;
use tile_merge::{
    has_available_merge, is_stuck, resolve_move, settle, Board, Direction, Position, Tile,
    CELL_COUNT,
};

fn arb_tiles() -> impl Strategy<Value = Vec<Tile>> {
    prop::collection::vec(prop::option::weighted(0.6, 1u32..=11), CELL_COUNT).prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .filter_map(|(i, exp)| exp.map(|e| Tile::new(Position::from_index(i), 1 << e)))
            .collect()
    })
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn tile_sum(tiles: &[Tile]) -> u64 {
    tiles.iter().map(|t| u64::from(t.value)).sum()
}

proptest! {
    #[test]
    fn settled_tiles_have_unique_positions(tiles in arb_tiles(), direction in arb_direction()) {
        let settled = settle(&resolve_move(&tiles, direction).unwrap());
        let board = Board::from_tiles(settled);
        prop_assert!(board.is_ok(), "settled board broke invariants: {:?}", board.err());
    }

    #[test]
    fn merges_conserve_value(tiles in arb_tiles(), direction in arb_direction()) {
        let plan = resolve_move(&tiles, direction).unwrap();
        let settled = settle(&plan);

        prop_assert_eq!(tile_sum(&settled), tile_sum(&tiles));
        prop_assert_eq!(settled.len() + plan.merge_count(), tiles.len());

        let merged: u64 = plan
            .transitions
            .iter()
            .filter_map(|t| t.pending_value())
            .map(u64::from)
            .sum();
        prop_assert_eq!(u64::from(plan.score_delta), merged);
    }

    #[test]
    fn tiles_only_move_toward_the_edge(tiles in arb_tiles(), direction in arb_direction()) {
        let axis = direction.axis();
        for t in resolve_move(&tiles, direction).unwrap().transitions {
            prop_assert_eq!(t.target.across(axis), t.source.position.across(axis));
            prop_assert!(
                direction.distance_from_edge(t.target.along(axis))
                    <= direction.distance_from_edge(t.source.position.along(axis))
            );
        }
    }

    #[test]
    fn settle_is_idempotent(tiles in arb_tiles(), direction in arb_direction()) {
        let mut board = Board::from_tiles(tiles).unwrap();
        board.begin(direction).unwrap();
        board.settle();
        let once = board.tiles().to_vec();

        prop_assert!(board.settle().is_none());
        prop_assert_eq!(board.tiles(), once.as_slice());
    }

    #[test]
    fn unmoved_plan_is_a_noop(tiles in arb_tiles(), direction in arb_direction()) {
        let plan = resolve_move(&tiles, direction).unwrap();
        if !plan.moved() {
            prop_assert_eq!(plan.score_delta, 0);
            prop_assert_eq!(settle(&plan), tiles);
        }
    }

    #[test]
    fn stuck_boards_cannot_move(tiles in arb_tiles()) {
        let board = Board::from_tiles(tiles).unwrap();
        if is_stuck(&board) {
            for direction in Direction::ALL {
                prop_assert!(!board.can_move(direction));
            }
        }
        if board.is_full() && has_available_merge(&board) {
            prop_assert!(Direction::ALL.iter().any(|&d| board.can_move(d)));
        }
    }
}
