//! Core types: symbols, positions, moves, state, configuration, errors.
//!
//! This module holds plain data. The rules that move a `GameState` forward
//! live in `rules`.

pub mod action;
pub mod config;
pub mod error;
pub mod position;
pub mod state;
pub mod symbol;

pub use action::{HistoryEntry, Move};
pub use config::EngineConfig;
pub use error::{CodecError, MoveRejection, ReplayError, StateError};
pub use position::Position;
pub use state::{GameState, SubBoard};
pub use symbol::{Mark, Symbol};
