//! Engine configuration.
//!
//! Hosts configure how a new game opens. The rules themselves are fixed.

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::symbol::Symbol;

/// How new games start.
///
/// ## Defaults
///
/// - `first_player`: X
/// - `opening_corner`: `None` (first move may go anywhere)
///
/// Hosts mirroring a server that opens in the center sub-board set
/// `opening_corner` to `Some(Position::Center)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Who makes the first move.
    pub first_player: Symbol,

    /// Sub-board the first move is forced into, if any.
    pub opening_corner: Option<Position>,
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first player.
    #[must_use]
    pub fn with_first_player(mut self, symbol: Symbol) -> Self {
        self.first_player = symbol;
        self
    }

    /// Force the first move into a sub-board.
    #[must_use]
    pub fn with_opening_corner(mut self, corner: Position) -> Self {
        self.opening_corner = Some(corner);
        self
    }
}
