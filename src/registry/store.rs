//! In-process game authority.
//!
//! `GameRegistry` owns the canonical record of many games and serializes
//! moves per game: each game sits behind its own `Mutex`, so at most one
//! move per game is evaluated at a time while different games proceed in
//! parallel. Readers receive cloned records, which are cheap because
//! history is persistent.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::core::action::Move;
use crate::core::error::MoveRejection;
use crate::core::state::GameState;
use crate::history::GameRecord;
use crate::rules::engine::UltimateEngine;

/// Identifier of a game held by a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game({})", self.0)
    }
}

/// Failure to submit a move through the registry.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown game {0}")]
    UnknownGame(GameId),

    #[error(transparent)]
    Rejected(#[from] MoveRejection),
}

impl RegistryError {
    /// HTTP status an API layer should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            RegistryError::UnknownGame(_) => 404,
            RegistryError::Rejected(rejection) => rejection.status_code(),
        }
    }
}

type SharedRecord = Arc<Mutex<GameRecord>>;

/// Canonical store of running games.
#[derive(Debug)]
pub struct GameRegistry {
    engine: UltimateEngine,
    games: RwLock<FxHashMap<GameId, SharedRecord>>,
    next_id: AtomicU64,
}

impl GameRegistry {
    #[must_use]
    pub fn new(engine: UltimateEngine) -> Self {
        Self {
            engine,
            games: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &UltimateEngine {
        &self.engine
    }

    /// Start a new game and return its id.
    pub fn create(&self) -> GameId {
        self.insert(GameRecord::new(&self.engine))
    }

    /// Adopt an existing record (for example, one loaded from storage).
    pub fn insert(&self, record: GameRecord) -> GameId {
        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(record)));
        debug!(%id, "game registered");
        id
    }

    /// Submit a move. Moves for the same game are applied one at a time.
    #[instrument(level = "debug", skip(self), fields(game = %id, player = %mv.player, corner = %mv.corner, position = %mv.position))]
    pub fn submit(&self, id: GameId, mv: Move) -> Result<GameState, RegistryError> {
        let shared = self.shared(id)?;
        let mut record = shared.lock().unwrap_or_else(PoisonError::into_inner);
        let state = record.play(mv)?.clone();
        Ok(state)
    }

    /// Snapshot of a game.
    #[must_use]
    pub fn fetch(&self, id: GameId) -> Option<GameRecord> {
        let shared = self.shared(id).ok()?;
        let record = shared.lock().unwrap_or_else(PoisonError::into_inner);
        Some(record.clone())
    }

    /// Remove a game, returning its final record.
    pub fn remove(&self, id: GameId) -> Option<GameRecord> {
        let shared = self
            .games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)?;
        let record = shared.lock().unwrap_or_else(PoisonError::into_inner);
        Some(record.clone())
    }

    /// Number of games held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn shared(&self, id: GameId) -> Result<SharedRecord, RegistryError> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(RegistryError::UnknownGame(id))
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(UltimateEngine::default())
    }
}
