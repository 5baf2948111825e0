//! Game records: the current snapshot plus its history.
//!
//! The engine never keeps history itself. Hosts wrap each game in a
//! `GameRecord`, which appends the pre-move snapshot, the move and a
//! timestamp for every accepted move.
//!
//! ## Key Types
//!
//! - `GameRecord`: current state + append-only history, replay, encoding
//! - `HistoryEntry`: one accepted move (from `core::action`)

pub mod record;

pub use record::GameRecord;

pub use crate::core::action::HistoryEntry;
