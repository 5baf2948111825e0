//! A game and its move history.
//!
//! `GameRecord` pairs the current snapshot with an append-only list of
//! earlier snapshots, each tagged with the move that left it. History lives
//! in an `im::Vector`, so cloning a record for readers is O(1).
//!
//! ## Wire format
//!
//! ```text
//! { "current_game": { <state>, "next_turn_timestamp": 0 },
//!   "history": [ { <state before move 0>, "next_turn_timestamp": <secs> }, ... ] }
//! ```
//!
//! History snapshots carry no move. Decoding recovers each move from the one
//! cell that differs from the following snapshot and replays it, so a
//! decoded history is always a legal game. A finished game may store the
//! loser on turn; decoding keeps the engine's form, with the last mover on
//! turn.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::core::action::{HistoryEntry, Move};
use crate::core::error::{CodecError, MoveRejection, ReplayError, StateError};
use crate::core::position::Position;
use crate::core::state::{GameState, GameStateRecord};
use crate::rules::engine::{apply_move, UltimateEngine};

/// Current state plus every earlier state of one game.
///
/// ## Example
///
/// ```
/// use ultimate_ttt::history::GameRecord;
/// use ultimate_ttt::core::{Move, Position, Symbol};
/// use ultimate_ttt::rules::UltimateEngine;
///
/// let engine = UltimateEngine::default();
/// let mut record = GameRecord::new(&engine);
///
/// record.play(Move::new(Symbol::X, Position::TopLeft, Position::Center)).unwrap();
///
/// assert_eq!(record.len(), 1);
/// assert_eq!(record.current().active_corner(), Some(Position::Center));
/// assert_eq!(record.state_at(0), Some(&engine.new_game()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GameRecordWire", try_from = "GameRecordWire")]
pub struct GameRecord {
    current: GameState,

    history: Vector<HistoryEntry>,
}

impl GameRecord {
    /// A fresh game.
    #[must_use]
    pub fn new(engine: &UltimateEngine) -> Self {
        Self::from_state(engine.new_game())
    }

    /// Continue from an arbitrary position with empty history.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self {
            current: state,
            history: Vector::new(),
        }
    }

    /// Rebuild a game by playing `moves` from the engine's start state.
    pub fn replay(
        engine: &UltimateEngine,
        moves: impl IntoIterator<Item = Move>,
    ) -> Result<Self, ReplayError> {
        let mut record = Self::new(engine);
        for (ply, played) in moves.into_iter().enumerate() {
            record
                .play_at(played, 0)
                .map_err(|rejection| ReplayError {
                    ply,
                    played,
                    rejection,
                })?;
        }
        Ok(record)
    }

    #[must_use]
    pub fn current(&self) -> &GameState {
        &self.current
    }

    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    /// Number of accepted moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Play a move stamped with the current wall-clock time.
    pub fn play(&mut self, mv: Move) -> Result<&GameState, MoveRejection> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        self.play_at(mv, now)
    }

    /// Play a move with an explicit timestamp (unix seconds).
    ///
    /// On rejection the record is unchanged.
    pub fn play_at(&mut self, mv: Move, timestamp: u64) -> Result<&GameState, MoveRejection> {
        let next = apply_move(&self.current, mv)?;
        let previous = std::mem::replace(&mut self.current, next);
        self.history
            .push_back(HistoryEntry::new(previous, mv, timestamp));
        debug!(ply = self.history.len(), "history extended");
        Ok(&self.current)
    }

    /// State after `ply` moves. `state_at(0)` is the start state and
    /// `state_at(len())` the current one.
    #[must_use]
    pub fn state_at(&self, ply: usize) -> Option<&GameState> {
        if ply == self.history.len() {
            Some(&self.current)
        } else {
            self.history.get(ply).map(|entry| &entry.state)
        }
    }

    /// Moves in the order they were played.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|entry| entry.played)
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.played)
    }

    // === Encoding ===

    /// JSON in the `{ "current_game": ..., "history": [...] }` shape.
    ///
    /// `from_json` also reads records written by earlier services, with or
    /// without `next_turn_timestamp` on each snapshot.
    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

// === Wire record ===

#[derive(Clone, Serialize, Deserialize)]
struct GameRecordWire {
    current_game: GameStateRecord,
    history: Vec<GameStateRecord>,
}

impl From<GameRecord> for GameRecordWire {
    fn from(record: GameRecord) -> Self {
        Self {
            current_game: GameStateRecord::from(record.current),
            history: record
                .history
                .into_iter()
                .map(|entry| GameStateRecord::stamped(entry.state, entry.timestamp))
                .collect(),
        }
    }
}

impl TryFrom<GameRecordWire> for GameRecord {
    type Error = StateError;

    fn try_from(wire: GameRecordWire) -> Result<Self, Self::Error> {
        let current = GameState::try_from(wire.current_game)?;
        let mut snapshots = wire
            .history
            .into_iter()
            .map(|record| {
                let timestamp = record.timestamp();
                GameState::try_from(record).map(|state| (state, timestamp))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();

        let Some((mut state, mut timestamp)) = snapshots.next() else {
            return Ok(Self::from_state(current));
        };
        let mut history = Vector::new();
        for (ply, (recorded, next_timestamp)) in
            snapshots.chain(std::iter::once((current, 0))).enumerate()
        {
            let (played, next) = link(ply, &state, &recorded)?;
            history.push_back(HistoryEntry::new(state, played, timestamp));
            state = next;
            timestamp = next_timestamp;
        }
        Ok(Self {
            current: state,
            history,
        })
    }
}

/// Recover the move between two stored snapshots and replay it.
///
/// The replayed state must match `recorded` in every field except `turn`
/// once the game is over.
fn link(ply: usize, state: &GameState, recorded: &GameState) -> Result<(Move, GameState), StateError> {
    let mut changed = Position::ALL
        .into_iter()
        .flat_map(|corner| Position::ALL.into_iter().map(move |position| (corner, position)))
        .filter(|&(corner, position)| state.cell(corner, position) != recorded.cell(corner, position));

    let (corner, position) = match (changed.next(), changed.next()) {
        (Some(cell), None) => cell,
        _ => return Err(StateError::UnlinkedHistory { ply }),
    };
    let player = recorded
        .cell(corner, position)
        .symbol()
        .ok_or(StateError::UnlinkedHistory { ply })?;
    let played = Move::new(player, corner, position);

    let next = apply_move(state, played).map_err(|rejection| StateError::IllegalHistoryMove {
        ply,
        played,
        rejection,
    })?;
    let matches = next.boards() == recorded.boards()
        && next.outcome() == recorded.outcome()
        && next.active_corner() == recorded.active_corner()
        && (next.is_finished() || next.turn() == recorded.turn());
    if !matches {
        return Err(StateError::DivergentHistory { ply, played });
    }
    Ok((played, next))
}
