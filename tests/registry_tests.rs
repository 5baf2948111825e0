//! Concurrent access to the game registry.
//!
//! Moves for one game are serialized, so two identical submissions racing
//! for the same turn can never both be accepted.

use std::sync::{Arc, Barrier};
use std::thread;

use ultimate_ttt::core::{Move, MoveRejection, Position, Symbol};
use ultimate_ttt::playout::{random_move, GameRng};
use ultimate_ttt::registry::{GameRegistry, RegistryError};
use ultimate_ttt::rules::UltimateEngine;
use ultimate_ttt::GameRecord;

#[test]
fn test_racing_duplicate_moves() {
    let registry = Arc::new(GameRegistry::new(UltimateEngine::default()));
    let id = registry.create();
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.submit(id, Move::new(Symbol::X, Position::TopLeft, Position::Center))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(
            *err,
            RegistryError::Rejected(MoveRejection::NotYourTurn {
                expected: Symbol::O,
                actual: Symbol::X
            })
        );
    }
    assert_eq!(registry.fetch(id).unwrap().len(), 1);
}

#[test]
fn test_racing_players_on_different_cells() {
    let registry = Arc::new(GameRegistry::default());
    let id = registry.create();
    let barrier = Arc::new(Barrier::new(Position::ALL.len()));

    // Every thread plays X into a different corner of an open board.
    let handles: Vec<_> = Position::ALL
        .into_iter()
        .map(|corner| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.submit(id, Move::new(Symbol::X, corner, Position::Center))
            })
        })
        .collect();

    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(Result::is_ok)
        .count();

    assert_eq!(accepted, 1);
    let record = registry.fetch(id).unwrap();
    assert_eq!(record.current().move_count(), 1);
    assert_eq!(record.current().turn(), Symbol::O);
}

#[test]
fn test_independent_games_in_parallel() {
    let registry = Arc::new(GameRegistry::default());

    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let id = registry.create();
                let mut rng = GameRng::new(seed);
                loop {
                    let state = registry.fetch(id).unwrap().current().clone();
                    let Some(mv) = random_move(&state, &mut rng) else {
                        break;
                    };
                    registry.submit(id, mv).unwrap();
                }
                id
            })
        })
        .collect();

    for handle in handles {
        let id = handle.join().unwrap();
        let record = registry.fetch(id).unwrap();
        assert!(record.current().is_finished());

        let replayed = GameRecord::replay(registry.engine(), record.moves()).unwrap();
        assert_eq!(replayed.current(), record.current());
    }
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_inserted_record_continues() {
    let registry = GameRegistry::default();
    let record = GameRecord::replay(
        registry.engine(),
        [Move::new(Symbol::X, Position::Center, Position::BottomLeft)],
    )
    .unwrap();

    let id = registry.insert(record);
    let err = registry
        .submit(id, Move::new(Symbol::O, Position::Center, Position::TopLeft))
        .unwrap_err();
    assert_eq!(err.status_code(), 422);

    let state = registry
        .submit(id, Move::new(Symbol::O, Position::BottomLeft, Position::TopLeft))
        .unwrap();
    assert_eq!(state.active_corner(), Some(Position::TopLeft));
}
