//! Per-game single-writer store.
//!
//! The engine is pure; whoever owns the canonical state must make sure two
//! submissions for one game are never both checked against the same stale
//! snapshot. `GameRegistry` does that in-process with a lock per game.
//! A rejected submission changes nothing, so callers can refetch and retry.

pub mod store;

pub use store::{GameId, GameRegistry, RegistryError};
