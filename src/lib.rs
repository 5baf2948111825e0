//! # ultimate-ttt
//!
//! Rules engine for Ultimate Tic-Tac-Toe: nine 3x3 sub-boards arranged in
//! a 3x3 meta-board. The cell a player marks selects the sub-board the
//! opponent must play in next.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `apply_move` takes a state and a move and
//!    returns a new state or a typed rejection. It never mutates its input,
//!    keeps no history and does no I/O.
//!
//! 2. **Checked snapshots**: every `GameState` that exists satisfies the
//!    game invariants. Decoding re-derives outcomes and refuses states that
//!    disagree with their own cells.
//!
//! 3. **History outside the engine**: `GameRecord` appends snapshots to a
//!    persistent `im::Vector`, so cloning a record is O(1).
//!
//! ## Modules
//!
//! - `core`: symbols, positions, moves, state, configuration, errors
//! - `rules`: 3x3 evaluation, legality and transitions
//! - `history`: game records and replay
//! - `registry`: per-game single-writer store for concurrent hosts
//! - `playout`: seeded random games
//!
//! ## Usage
//!
//! ```rust
//! use ultimate_ttt::{Move, Position, Symbol, UltimateEngine};
//!
//! let engine = UltimateEngine::default();
//! let state = engine.new_game();
//! let next = engine
//!     .apply_move(&state, Move::new(Symbol::X, Position::TopLeft, Position::Center))
//!     .unwrap();
//!
//! assert_eq!(next.turn(), Symbol::O);
//! assert_eq!(next.active_corner(), Some(Position::Center));
//! ```

pub mod core;
pub mod history;
pub mod playout;
pub mod registry;
mod render;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CodecError, EngineConfig, GameState, HistoryEntry, Mark, Move, MoveRejection, Position,
    ReplayError, StateError, SubBoard, Symbol,
};

pub use crate::rules::{apply_move, legal_moves, Outcome, UltimateEngine};

pub use crate::history::GameRecord;

pub use crate::registry::{GameId, GameRegistry, RegistryError};

pub use crate::playout::{random_playout, random_playouts, GameRng};
