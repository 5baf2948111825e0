//! Error types.
//!
//! ## MoveRejection
//!
//! Every illegal move is an ordinary value, not a fault. The variant names
//! the first precondition that failed, so callers can render a precise
//! message and simply refetch and retry.
//!
//! ## StateError
//!
//! A decoded or hand-built state that violates the board invariants, or a
//! decoded history whose snapshots are not linked by legal moves.
//!
//! ## CodecError
//!
//! Failures of the JSON/bincode helpers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::Move;
use super::position::Position;
use super::symbol::Symbol;

/// Why a move was not applied. The state it was checked against is unchanged.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    #[error("the game is already finished")]
    GameAlreadyFinished,

    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: Symbol, actual: Symbol },

    #[error("you must play in the {required} section, not {attempted}")]
    WrongCorner {
        required: Position,
        attempted: Position,
    },

    #[error("the {corner} section is already decided; choose any open section")]
    CornerAlreadyDecided { corner: Position },

    #[error("position {position} in the {corner} section is already taken")]
    CellOccupied { corner: Position, position: Position },
}

impl MoveRejection {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            MoveRejection::GameAlreadyFinished => "game_already_finished",
            MoveRejection::NotYourTurn { .. } => "not_your_turn",
            MoveRejection::WrongCorner { .. } => "wrong_corner",
            MoveRejection::CornerAlreadyDecided { .. } => "corner_already_decided",
            MoveRejection::CellOccupied { .. } => "cell_occupied",
        }
    }

    /// HTTP status an API layer should answer with.
    ///
    /// Conflicts with the current state are 409; a move aimed at the wrong
    /// section is 422.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            MoveRejection::WrongCorner { .. } => 422,
            _ => 409,
        }
    }
}

/// An inconsistent board or state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    #[error("invalid symbol '{0}' (expected \"\", \"X\" or \"O\")")]
    InvalidSymbol(String),

    #[error("invalid position '{0}'")]
    InvalidPosition(String),

    #[error("board has winner {winner} but is not marked finished")]
    WinnerWithoutFinish { winner: Symbol },

    #[error("board records {recorded} but its cells evaluate to {actual}")]
    SubBoardMismatch { recorded: String, actual: String },

    #[error("sub-board {corner}: {source}")]
    InSubBoard {
        corner: Position,
        #[source]
        source: Box<StateError>,
    },

    #[error("game records {recorded} but its sub-boards evaluate to {actual}")]
    MetaMismatch { recorded: String, actual: String },

    #[error("active corner {0} points at a finished sub-board")]
    ActiveCornerDecided(Position),

    #[error("history entry {ply} is not followed by exactly one new mark")]
    UnlinkedHistory { ply: usize },

    #[error("history entry {ply}: move {played} was illegal: {rejection}")]
    IllegalHistoryMove {
        ply: usize,
        played: Move,
        #[source]
        rejection: MoveRejection,
    },

    #[error("history entry {ply}: move {played} does not lead to the next snapshot")]
    DivergentHistory { ply: usize, played: Move },
}

/// A recorded move sequence that does not replay.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("move {ply} ({played}) rejected: {rejection}")]
pub struct ReplayError {
    /// Zero-based index of the failing move.
    pub ply: usize,
    pub played: Move,
    #[source]
    pub rejection: MoveRejection,
}

/// Encoding or decoding failure.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Binary(#[from] bincode::Error),
}
