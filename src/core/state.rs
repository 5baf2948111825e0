//! Board and game state.
//!
//! ## SubBoard
//!
//! One 3x3 grid of marks plus its outcome (`finished`, `winner`). A board
//! with a winner is always finished; a finished board with no winner is a
//! draw. Once finished, a board never changes.
//!
//! ## GameState
//!
//! Nine sub-boards, whose turn it is, the meta outcome, and the active
//! corner. Values are snapshots: the engine builds a new one for every
//! accepted move and never touches the one it was given.
//!
//! ## Wire format
//!
//! Both types (de)serialize through flat records whose field names are the
//! position names:
//!
//! ```text
//! { "turn": "X", "finished": false, "winner": "", "activeCorner": "",
//!   "topleft": { "finished": false, "winner": "", "topleft": "", ... },
//!   ..., "next_turn_timestamp": 0 }
//! ```
//!
//! `next_turn_timestamp` is only meaningful for snapshots stored in a game
//! history. A bare state writes 0 and ignores it on read; it may be absent.
//!
//! Decoding re-checks every outcome against the cells, so a decoded state
//! satisfies the same invariants as one produced by the engine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::EngineConfig;
use super::error::{CodecError, StateError};
use super::position::Position;
use super::symbol::{Mark, Symbol};
use crate::rules::board::{self, Outcome};
use crate::rules::engine::meta_outcome;

/// A single 3x3 sub-board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "SubBoardRecord", try_from = "SubBoardRecord")]
pub struct SubBoard {
    cells: [Mark; 9],
    finished: bool,
    winner: Option<Symbol>,
}

impl SubBoard {
    /// An empty, unfinished board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from its cells, deriving the outcome.
    #[must_use]
    pub fn from_cells(cells: [Mark; 9]) -> Self {
        let mut sub = Self {
            cells,
            finished: false,
            winner: None,
        };
        sub.refresh();
        sub
    }

    #[must_use]
    pub fn cells(&self) -> &[Mark; 9] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, position: Position) -> Mark {
        self.cells[position.index()]
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn winner(&self) -> Option<Symbol> {
        self.winner
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_parts(self.finished, self.winner)
    }

    /// The mark this board contributes to the meta grid.
    ///
    /// Unfinished and drawn boards both contribute `Mark::Empty`.
    #[must_use]
    pub fn meta_mark(&self) -> Mark {
        Mark::from(self.winner)
    }

    /// Empty cells in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|p| self.cell(*p).is_empty())
    }

    /// Mark a cell and re-evaluate. Callers have already checked legality.
    pub(crate) fn place(&mut self, position: Position, symbol: Symbol) {
        debug_assert!(!self.finished, "placing into a finished sub-board");
        debug_assert!(self.cell(position).is_empty(), "placing into an occupied cell");
        self.cells[position.index()] = Mark::from(symbol);
        self.refresh();
    }

    fn refresh(&mut self) {
        let outcome = board::evaluate(&self.cells);
        self.finished = outcome.is_finished();
        self.winner = outcome.winner();
    }
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "GameStateRecord", try_from = "GameStateRecord")]
pub struct GameState {
    pub(crate) boards: [SubBoard; 9],
    pub(crate) turn: Symbol,
    pub(crate) finished: bool,
    pub(crate) winner: Option<Symbol>,
    pub(crate) active_corner: Option<Position>,
}

impl GameState {
    /// Start state with default configuration: X to move, any corner.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Start state for the given configuration.
    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            boards: Default::default(),
            turn: config.first_player,
            finished: false,
            winner: None,
            active_corner: config.opening_corner,
        }
    }

    /// Set up a position from sub-boards.
    ///
    /// The meta outcome is derived from the boards. The active corner must
    /// be unset or name an unfinished board while the game is running.
    pub fn from_boards(
        boards: [SubBoard; 9],
        turn: Symbol,
        active_corner: Option<Position>,
    ) -> Result<Self, StateError> {
        let outcome = meta_outcome(&boards);
        let state = Self {
            boards,
            turn,
            finished: outcome.is_finished(),
            winner: outcome.winner(),
            active_corner,
        };
        state.check_active_corner()?;
        Ok(state)
    }

    // === Accessors ===

    #[must_use]
    pub fn boards(&self) -> &[SubBoard; 9] {
        &self.boards
    }

    #[must_use]
    pub fn board(&self, corner: Position) -> &SubBoard {
        &self.boards[corner.index()]
    }

    #[must_use]
    pub fn cell(&self, corner: Position, position: Position) -> Mark {
        self.board(corner).cell(position)
    }

    /// Whose move is next. After the game ends, the player who made the last move.
    #[must_use]
    pub fn turn(&self) -> Symbol {
        self.turn
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn winner(&self) -> Option<Symbol> {
        self.winner
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_parts(self.finished, self.winner)
    }

    /// The sub-board the next move is forced into, `None` for free choice.
    #[must_use]
    pub fn active_corner(&self) -> Option<Position> {
        self.active_corner
    }

    /// Sub-board winners laid out as a grid.
    #[must_use]
    pub fn meta_grid(&self) -> [Mark; 9] {
        crate::rules::engine::meta_grid(&self.boards)
    }

    /// Corners the next move may target. Empty once the game is over.
    #[must_use]
    pub fn eligible_corners(&self) -> SmallVec<[Position; 9]> {
        if self.finished {
            return SmallVec::new();
        }
        match self.active_corner {
            Some(corner) if !self.board(corner).is_finished() => SmallVec::from_slice(&[corner]),
            _ => Position::ALL
                .into_iter()
                .filter(|c| !self.board(*c).is_finished())
                .collect(),
        }
    }

    /// Number of marks on the board.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.boards
            .iter()
            .map(|b| b.cells().iter().filter(|c| !c.is_empty()).count())
            .sum()
    }

    // === Encoding ===

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(json)?)
    }

    fn check_active_corner(&self) -> Result<(), StateError> {
        match self.active_corner {
            Some(corner) if !self.finished && self.board(corner).is_finished() => {
                Err(StateError::ActiveCornerDecided(corner))
            }
            _ => Ok(()),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// === Wire records ===

#[derive(Clone, Serialize, Deserialize)]
struct SubBoardRecord {
    finished: bool,
    winner: Mark,
    topleft: Mark,
    topmiddle: Mark,
    topright: Mark,
    middleleft: Mark,
    center: Mark,
    middleright: Mark,
    bottomleft: Mark,
    bottommiddle: Mark,
    bottomright: Mark,
}

impl From<SubBoard> for SubBoardRecord {
    fn from(sub: SubBoard) -> Self {
        let [topleft, topmiddle, topright, middleleft, center, middleright, bottomleft, bottommiddle, bottomright] =
            sub.cells;
        Self {
            finished: sub.finished,
            winner: Mark::from(sub.winner),
            topleft,
            topmiddle,
            topright,
            middleleft,
            center,
            middleright,
            bottomleft,
            bottommiddle,
            bottomright,
        }
    }
}

impl SubBoardRecord {
    fn into_parts(self) -> ([Mark; 9], bool, Option<Symbol>) {
        let cells = [
            self.topleft,
            self.topmiddle,
            self.topright,
            self.middleleft,
            self.center,
            self.middleright,
            self.bottomleft,
            self.bottommiddle,
            self.bottomright,
        ];
        (cells, self.finished, self.winner.symbol())
    }
}

/// Stored outcome must agree with the cells.
fn decode_sub_board(record: SubBoardRecord) -> Result<SubBoard, StateError> {
    let (cells, finished, winner) = record.into_parts();
    if let (false, Some(winner)) = (finished, winner) {
        return Err(StateError::WinnerWithoutFinish { winner });
    }
    let sub = SubBoard::from_cells(cells);
    let recorded = Outcome::from_parts(finished, winner);
    if sub.outcome() != recorded {
        return Err(StateError::SubBoardMismatch {
            recorded: recorded.to_string(),
            actual: sub.outcome().to_string(),
        });
    }
    Ok(sub)
}

impl TryFrom<SubBoardRecord> for SubBoard {
    type Error = StateError;

    fn try_from(record: SubBoardRecord) -> Result<Self, Self::Error> {
        decode_sub_board(record)
    }
}

/// Flat wire form of a `GameState`, shared with `GameRecord` history.
#[derive(Clone, Serialize, Deserialize)]
pub(crate) struct GameStateRecord {
    turn: Symbol,
    finished: bool,
    winner: Mark,
    #[serde(rename = "activeCorner", with = "active_corner")]
    active_corner: Option<Position>,
    topleft: SubBoardRecord,
    topmiddle: SubBoardRecord,
    topright: SubBoardRecord,
    middleleft: SubBoardRecord,
    center: SubBoardRecord,
    middleright: SubBoardRecord,
    bottomleft: SubBoardRecord,
    bottommiddle: SubBoardRecord,
    bottomright: SubBoardRecord,
    #[serde(default)]
    next_turn_timestamp: u64,
}

impl GameStateRecord {
    /// A history snapshot taken at `timestamp`.
    pub(crate) fn stamped(state: GameState, timestamp: u64) -> Self {
        Self {
            next_turn_timestamp: timestamp,
            ..Self::from(state)
        }
    }

    pub(crate) fn timestamp(&self) -> u64 {
        self.next_turn_timestamp
    }
}

impl From<GameState> for GameStateRecord {
    fn from(state: GameState) -> Self {
        let [topleft, topmiddle, topright, middleleft, center, middleright, bottomleft, bottommiddle, bottomright] =
            state.boards.map(SubBoardRecord::from);
        Self {
            turn: state.turn,
            finished: state.finished,
            winner: Mark::from(state.winner),
            active_corner: state.active_corner,
            topleft,
            topmiddle,
            topright,
            middleleft,
            center,
            middleright,
            bottomleft,
            bottommiddle,
            bottomright,
            next_turn_timestamp: 0,
        }
    }
}

impl TryFrom<GameStateRecord> for GameState {
    type Error = StateError;

    fn try_from(record: GameStateRecord) -> Result<Self, Self::Error> {
        let GameStateRecord {
            turn,
            finished,
            winner,
            active_corner,
            topleft,
            topmiddle,
            topright,
            middleleft,
            center,
            middleright,
            bottomleft,
            bottommiddle,
            bottomright,
            next_turn_timestamp: _,
        } = record;

        let records = [
            topleft,
            topmiddle,
            topright,
            middleleft,
            center,
            middleright,
            bottomleft,
            bottommiddle,
            bottomright,
        ];
        let mut boards: [SubBoard; 9] = Default::default();
        for (corner, sub) in Position::ALL.into_iter().zip(records) {
            boards[corner.index()] = decode_sub_board(sub).map_err(|e| StateError::InSubBoard {
                corner,
                source: Box::new(e),
            })?;
        }

        let winner = winner.symbol();
        if let (false, Some(winner)) = (finished, winner) {
            return Err(StateError::WinnerWithoutFinish { winner });
        }
        let recorded = Outcome::from_parts(finished, winner);
        let actual = meta_outcome(&boards);
        if recorded != actual {
            return Err(StateError::MetaMismatch {
                recorded: recorded.to_string(),
                actual: actual.to_string(),
            });
        }

        let state = GameState {
            boards,
            turn,
            finished,
            winner,
            active_corner,
        };
        state.check_active_corner()?;
        Ok(state)
    }
}

/// `Option<Position>` as `""` or a position name.
mod active_corner {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::position::Position;

    pub fn serialize<S: Serializer>(corner: &Option<Position>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(corner.map_or("", Position::name))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Position>, D::Error> {
        let name = String::deserialize(d)?;
        if name.is_empty() {
            return Ok(None);
        }
        name.parse().map(Some).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(s: &str) -> [Mark; 9] {
        let mut cells = [Mark::Empty; 9];
        for (i, ch) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            cells[i] = match ch {
                'X' => Mark::X,
                'O' => Mark::O,
                _ => Mark::Empty,
            };
        }
        cells
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new();

        assert_eq!(state.turn(), Symbol::X);
        assert!(!state.is_finished());
        assert_eq!(state.winner(), None);
        assert_eq!(state.active_corner(), None);
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.eligible_corners().len(), 9);
        assert!(state.boards().iter().all(|b| !b.is_finished()));
    }

    #[test]
    fn test_with_config() {
        let config = EngineConfig::new()
            .with_first_player(Symbol::O)
            .with_opening_corner(Position::Center);
        let state = GameState::with_config(&config);

        assert_eq!(state.turn(), Symbol::O);
        assert_eq!(state.active_corner(), Some(Position::Center));
        assert_eq!(state.eligible_corners().as_slice(), &[Position::Center]);
    }

    #[test]
    fn test_sub_board_place_and_finish() {
        let mut sub = SubBoard::new();
        sub.place(Position::TopLeft, Symbol::X);
        sub.place(Position::Center, Symbol::X);
        assert!(!sub.is_finished());
        assert_eq!(sub.empty_positions().count(), 7);

        sub.place(Position::BottomRight, Symbol::X);
        assert!(sub.is_finished());
        assert_eq!(sub.winner(), Some(Symbol::X));
        assert_eq!(sub.meta_mark(), Mark::X);
    }

    #[test]
    fn test_drawn_sub_board_contributes_empty() {
        let sub = SubBoard::from_cells(marks("XOX XOO OXX"));
        assert!(sub.is_finished());
        assert_eq!(sub.winner(), None);
        assert_eq!(sub.outcome(), Outcome::Draw);
        assert_eq!(sub.meta_mark(), Mark::Empty);
    }

    #[test]
    fn test_from_boards_derives_meta() {
        let won = SubBoard::from_cells(marks("XXX ... ..."));
        let mut boards: [SubBoard; 9] = Default::default();
        boards[0] = won.clone();
        boards[1] = won.clone();
        boards[2] = won;

        let state = GameState::from_boards(boards, Symbol::X, None).unwrap();
        assert!(state.is_finished());
        assert_eq!(state.winner(), Some(Symbol::X));
        assert!(state.eligible_corners().is_empty());
    }

    #[test]
    fn test_from_boards_rejects_decided_active_corner() {
        let mut boards: [SubBoard; 9] = Default::default();
        boards[4] = SubBoard::from_cells(marks("OOO ... ..."));

        let err = GameState::from_boards(boards, Symbol::X, Some(Position::Center)).unwrap_err();
        assert_eq!(err, StateError::ActiveCornerDecided(Position::Center));
    }

    #[test]
    fn test_json_shape() {
        let state = GameState::new();
        let value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();

        assert_eq!(value["turn"], "X");
        assert_eq!(value["finished"], false);
        assert_eq!(value["winner"], "");
        assert_eq!(value["activeCorner"], "");
        assert_eq!(value["bottommiddle"]["center"], "");
        assert_eq!(value["topleft"]["finished"], false);
        assert_eq!(value["topleft"]["winner"], "");
        assert_eq!(value["next_turn_timestamp"], 0);
    }

    #[test]
    fn test_decode_without_timestamp() {
        let mut value: serde_json::Value =
            serde_json::from_str(&GameState::new().to_json().unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("next_turn_timestamp");

        assert_eq!(serde_json::from_value::<GameState>(value).unwrap(), GameState::new());
    }

    #[test]
    fn test_json_round_trip() {
        let mut boards: [SubBoard; 9] = Default::default();
        boards[0] = SubBoard::from_cells(marks("XOX XOO OXX"));
        boards[3] = SubBoard::from_cells(marks("O.. .O. ..O"));
        boards[5] = SubBoard::from_cells(marks("X.. .O. ..X"));
        let state = GameState::from_boards(boards, Symbol::O, Some(Position::MiddleRight)).unwrap();

        let json = state.to_json().unwrap();
        let back = GameState::from_json(&json).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_decode_rejects_inconsistent_sub_board() {
        let mut value: serde_json::Value =
            serde_json::from_str(&GameState::new().to_json().unwrap()).unwrap();
        value["center"]["topleft"] = "X".into();
        value["center"]["topmiddle"] = "X".into();
        value["center"]["topright"] = "X".into();

        // Cells show a win but the board claims to be unfinished.
        let err = serde_json::from_value::<GameState>(value).unwrap_err();
        assert!(err.to_string().contains("center"), "{err}");
    }

    #[test]
    fn test_decode_rejects_winner_without_finish() {
        let mut value: serde_json::Value =
            serde_json::from_str(&GameState::new().to_json().unwrap()).unwrap();
        value["winner"] = "O".into();

        assert!(serde_json::from_value::<GameState>(value).is_err());
    }

    #[test]
    fn test_decode_rejects_null_cell() {
        let mut value: serde_json::Value =
            serde_json::from_str(&GameState::new().to_json().unwrap()).unwrap();
        value["topleft"]["center"] = serde_json::Value::Null;

        assert!(serde_json::from_value::<GameState>(value).is_err());
    }
}
