//! Moves and history entries.
//!
//! A move names who is acting, which sub-board (`corner`) and which cell
//! inside it (`position`). The wire shape matches the turn payload an API
//! layer receives: `{ "player": "X", "corner": "center", "position": "topleft" }`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::Position;
use super::state::GameState;
use super::symbol::Symbol;

/// A single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// The acting player.
    pub player: Symbol,

    /// Sub-board to play in.
    pub corner: Position,

    /// Cell within that sub-board. Also the corner the opponent is sent to.
    pub position: Position,
}

impl Move {
    #[must_use]
    pub const fn new(player: Symbol, corner: Position, position: Position) -> Self {
        Self {
            player,
            corner,
            position,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.player, self.corner, self.position)
    }
}

/// An accepted move with the state it was played against.
///
/// Used for:
/// - Replay and audit
/// - Showing how long a player took (`timestamp`)
///
/// On the wire a `GameRecord` stores only the snapshot and its timestamp;
/// the move is recovered from the next snapshot when decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// State before the move.
    pub state: GameState,

    /// The move that was played.
    pub played: Move,

    /// Unix seconds when the move was accepted.
    pub timestamp: u64,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(state: GameState, played: Move, timestamp: u64) -> Self {
        Self {
            state,
            played,
            timestamp,
        }
    }
}
