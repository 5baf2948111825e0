//! Uniformly random games.
//!
//! Every move is drawn from `legal_moves`, so a playout exercises exactly
//! the transitions a real game can reach.

use std::num::NonZeroUsize;
use std::panic;
use std::thread;

use tracing::{debug, warn};

use super::rng::GameRng;
use crate::core::action::Move;
use crate::core::state::GameState;
use crate::history::GameRecord;
use crate::rules::engine::{legal_moves, UltimateEngine};

/// A uniformly random legal move, `None` once the game is over.
#[must_use]
pub fn random_move(state: &GameState, rng: &mut GameRng) -> Option<Move> {
    rng.choose(&legal_moves(state)).copied()
}

/// Play random moves until the game ends or `max_moves` have been played.
///
/// Returns the number of moves played. Synthetic moves carry timestamp 0.
pub fn play_out(record: &mut GameRecord, rng: &mut GameRng, max_moves: usize) -> usize {
    let mut played = 0;
    while played < max_moves {
        let Some(mv) = random_move(record.current(), rng) else {
            break;
        };
        if let Err(rejection) = record.play_at(mv, 0) {
            warn!(%mv, %rejection, "generated move was rejected");
            break;
        }
        played += 1;
    }
    played
}

fn play_game(engine: &UltimateEngine, rng: &mut GameRng) -> GameRecord {
    let mut record = GameRecord::new(engine);
    let played = play_out(&mut record, rng, usize::MAX);
    debug!(seed = rng.seed(), played, outcome = %record.current().outcome(), "playout finished");
    record
}

/// Play a complete random game from the engine's start state.
///
/// The same seed always produces the same game.
#[must_use]
pub fn random_playout(engine: &UltimateEngine, seed: u64) -> GameRecord {
    play_game(engine, &mut GameRng::new(seed))
}

/// Play `count` complete random games in parallel.
///
/// Game `i` runs on the `i`-th fork of `GameRng::new(seed)`, so the result
/// depends only on `seed` and `count`, not on scheduling.
#[must_use]
pub fn random_playouts(engine: &UltimateEngine, seed: u64, count: usize) -> Vec<GameRecord> {
    let mut root = GameRng::new(seed);
    let streams: Vec<GameRng> = (0..count).map(|_| root.fork()).collect();
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    let chunk_size = count.div_ceil(workers).max(1);

    thread::scope(|scope| {
        let handles: Vec<_> = streams
            .chunks(chunk_size)
            .map(|chunk| {
                let mut chunk = chunk.to_vec();
                scope.spawn(move || {
                    chunk
                        .iter_mut()
                        .map(|rng| play_game(engine, rng))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    })
}
