//! Session integration tests with real RNG and stores.

use tile_merge::{
    Direction, GameConfig, GameRng, JsonFileStore, MemoryStore, ScoreStore, Session,
    SessionSnapshot,
};

/// Cycle through directions until the game ends or `max_moves` is reached.
fn play_out<S: ScoreStore>(session: &mut Session<GameRng, S>, max_moves: usize) -> usize {
    let mut played = 0;
    for i in 0..max_moves {
        if session.is_game_over() {
            break;
        }
        let direction = Direction::ALL[i % 4];
        if session.play(direction).unwrap().is_some() {
            played += 1;
        }
    }
    played
}

// =============================================================================
// Full Games
// =============================================================================

#[test]
fn test_random_game_keeps_invariants() {
    let mut session = Session::with_seed(7).unwrap();
    let mut last_score = 0;

    for i in 0..500 {
        if session.is_game_over() {
            break;
        }
        let before: u64 = session.board().total_value();
        let report = session.play(Direction::ALL[(i * 7 + 3) % 4]).unwrap();

        session.board().check_invariants().unwrap();
        assert!(session.score() >= last_score);
        assert!(session.best_score() >= session.score());
        last_score = session.score();

        if let Some(report) = report {
            let spawned = report.spawned.map_or(0, |t| u64::from(t.value));
            assert_eq!(session.board().total_value(), before + spawned);
            assert!(report.plan.moved());
        } else {
            assert_eq!(session.board().total_value(), before);
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Session::with_seed(99).unwrap();
    let mut b = Session::with_seed(99).unwrap();

    play_out(&mut a, 200);
    play_out(&mut b, 200);

    assert_eq!(a.tiles(), b.tiles());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_long_game_eventually_ends_or_scores() {
    let mut session = Session::with_seed(3).unwrap();
    let played = play_out(&mut session, 5_000);
    assert!(played > 0);
    assert!(session.score() > 0);
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_snapshot_json_resume_continues_identically() {
    let mut original = Session::with_seed(1234).unwrap();
    play_out(&mut original, 30);

    let json = original.snapshot().to_json().unwrap();
    let snapshot = SessionSnapshot::from_json(&json).unwrap();
    assert!(snapshot.rng.is_some());

    let mut resumed =
        Session::from_snapshot(GameConfig::default(), &snapshot, MemoryStore::new()).unwrap();
    assert_eq!(resumed.tiles(), original.tiles());
    assert_eq!(resumed.score(), original.score());

    for i in 0..40 {
        let direction = Direction::ALL[(i + 1) % 4];
        let a = original.play(direction).unwrap();
        let b = resumed.play(direction).unwrap();
        assert_eq!(a, b);
    }
    assert_eq!(resumed.tiles(), original.tiles());
}

#[test]
fn test_snapshot_from_json_rejects_garbage() {
    assert!(SessionSnapshot::from_json("{").is_err());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_best_score_loaded_from_file_store() {
    let path = std::env::temp_dir().join(format!("tile-merge-session-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let best = {
        let mut session =
            Session::new(GameConfig::default(), GameRng::new(5), JsonFileStore::new(&path)).unwrap();
        play_out(&mut session, 100);
        session.best_score()
    };
    assert!(best > 0);

    let session =
        Session::new(GameConfig::default(), GameRng::new(6), JsonFileStore::new(&path)).unwrap();
    assert_eq!(session.best_score(), best);
    assert_eq!(session.score(), 0);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_custom_best_score_key() {
    let config = GameConfig::new().with_best_score_key("classic.best");
    let mut session = Session::new(config, GameRng::new(8), MemoryStore::new()).unwrap();
    play_out(&mut session, 100);

    let store = session.store();
    assert_eq!(store.get("classic.best").unwrap(), Some(session.best_score()));
    assert_eq!(store.get("bestScore").unwrap(), None);
}
