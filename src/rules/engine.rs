//! Move legality and state transitions.
//!
//! `apply_move` is the only transition. It borrows the current snapshot,
//! checks the move, and returns a fresh snapshot or a `MoveRejection`.
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. the game is still running
//! 2. the mover is the player on turn
//! 3. the move targets the active corner, if one is set
//! 4. the targeted sub-board is not decided
//! 5. the targeted cell is empty
//!
//! On success the sub-board and meta outcomes are recomputed and the next
//! active corner is the cell just played, unless that sub-board is already
//! decided, in which case the next player may choose freely.

use tracing::{debug, info, instrument, trace};

use super::board::{self, Outcome};
use crate::core::action::Move;
use crate::core::config::EngineConfig;
use crate::core::error::MoveRejection;
use crate::core::position::Position;
use crate::core::state::{GameState, SubBoard};
use crate::core::symbol::Mark;

/// Sub-board winners as a grid. Unfinished and drawn boards are empty.
#[must_use]
pub fn meta_grid(boards: &[SubBoard; 9]) -> [Mark; 9] {
    let mut grid = [Mark::Empty; 9];
    for (cell, sub) in grid.iter_mut().zip(boards) {
        *cell = sub.meta_mark();
    }
    grid
}

/// Outcome of the meta-board.
///
/// A line of sub-boards won by one symbol wins. Without one, the game is a
/// draw once every sub-board is finished. Drawn sub-boards hold no symbol,
/// so a full meta grid is not required for a draw.
#[must_use]
pub fn meta_outcome(boards: &[SubBoard; 9]) -> Outcome {
    if let Some(symbol) = board::line_winner(&meta_grid(boards)) {
        Outcome::Won(symbol)
    } else if boards.iter().all(SubBoard::is_finished) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Check a move against a state without applying it.
pub fn check_move(state: &GameState, mv: &Move) -> Result<(), MoveRejection> {
    if state.is_finished() {
        return Err(MoveRejection::GameAlreadyFinished);
    }
    if mv.player != state.turn() {
        return Err(MoveRejection::NotYourTurn {
            expected: state.turn(),
            actual: mv.player,
        });
    }
    if let Some(required) = state.active_corner() {
        if mv.corner != required {
            return Err(MoveRejection::WrongCorner {
                required,
                attempted: mv.corner,
            });
        }
    }
    let sub = state.board(mv.corner);
    if sub.is_finished() {
        return Err(MoveRejection::CornerAlreadyDecided { corner: mv.corner });
    }
    if !sub.cell(mv.position).is_empty() {
        return Err(MoveRejection::CellOccupied {
            corner: mv.corner,
            position: mv.position,
        });
    }
    Ok(())
}

/// Whether `mv` would be accepted.
#[must_use]
pub fn is_legal(state: &GameState, mv: &Move) -> bool {
    check_move(state, mv).is_ok()
}

/// Apply a move, producing the next snapshot.
///
/// The input state is never modified. Calling again with the same state and
/// move yields the same result.
#[instrument(
    level = "debug",
    skip(state),
    fields(player = %mv.player, corner = %mv.corner, position = %mv.position)
)]
pub fn apply_move(state: &GameState, mv: Move) -> Result<GameState, MoveRejection> {
    if let Err(rejection) = check_move(state, &mv) {
        debug!(code = rejection.code(), %rejection, "move rejected");
        return Err(rejection);
    }

    let mut next = state.clone();
    let sub = &mut next.boards[mv.corner.index()];
    sub.place(mv.position, mv.player);
    if sub.is_finished() {
        info!(corner = %mv.corner, outcome = %sub.outcome(), "sub-board decided");
    }

    // Sending a player to a decided sub-board frees their choice.
    next.active_corner = if next.board(mv.position).is_finished() {
        None
    } else {
        Some(mv.position)
    };

    match meta_outcome(&next.boards) {
        Outcome::InProgress => {
            next.turn = mv.player.opponent();
        }
        decided => {
            next.finished = true;
            next.winner = decided.winner();
            info!(outcome = %decided, "game decided");
        }
    }

    trace!(next_turn = %next.turn, active_corner = ?next.active_corner, "move applied");
    Ok(next)
}

/// Every legal move for the player on turn.
///
/// Ordered by corner, then by cell, both row-major. Empty once the game is
/// over.
#[must_use]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let player = state.turn();
    state
        .eligible_corners()
        .into_iter()
        .flat_map(|corner| {
            state
                .board(corner)
                .empty_positions()
                .map(move |position| Move::new(player, corner, position))
        })
        .collect()
}

/// A configured rules engine.
///
/// Carries the opening configuration so hosts pass one value around; the
/// transition functions themselves are configuration-free.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UltimateEngine {
    config: EngineConfig,
}

impl UltimateEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start state for a new game.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::with_config(&self.config)
    }

    pub fn apply_move(&self, state: &GameState, mv: Move) -> Result<GameState, MoveRejection> {
        apply_move(state, mv)
    }

    #[must_use]
    pub fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        legal_moves(state)
    }

    #[must_use]
    pub fn is_legal(&self, state: &GameState, mv: &Move) -> bool {
        is_legal(state, mv)
    }

    /// Outcome of a sub-board, or of the whole game when `corner` is `None`.
    #[must_use]
    pub fn outcome(&self, state: &GameState, corner: Option<Position>) -> Outcome {
        match corner {
            Some(corner) => state.board(corner).outcome(),
            None => state.outcome(),
        }
    }
}
