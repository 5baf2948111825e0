//! Player symbols and cell marks.
//!
//! ## Symbol
//!
//! The two players, `X` and `O`. `X` moves first by convention.
//!
//! ## Mark
//!
//! Three-valued content of a cell (or of a winner field): empty, `X` or `O`.
//! On the wire, `Mark::Empty` is the empty string, so "no mark" and
//! "not applicable" share one encoding and never appear as `null`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::StateError;

/// One of the two players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    #[default]
    X,
    O,
}

impl Symbol {
    /// Both symbols, `X` first.
    pub const ALL: [Symbol; 2] = [Symbol::X, Symbol::O];

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Single-character name (`'X'` or `'O'`).
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Symbol {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Symbol::X),
            "O" => Ok(Symbol::O),
            other => Err(StateError::InvalidSymbol(other.to_string())),
        }
    }
}

/// Content of a single cell: empty or one symbol, never both.
///
/// Also used as the wire form of optional winners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    /// The symbol in this cell, if any.
    #[must_use]
    pub const fn symbol(self) -> Option<Symbol> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(Symbol::X),
            Mark::O => Some(Symbol::O),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Mark::Empty)
    }

    /// Wire name: `""`, `"X"` or `"O"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mark::Empty => "",
            Mark::X => "X",
            Mark::O => "O",
        }
    }

    /// Character used in text dumps (`.` for empty).
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl From<Symbol> for Mark {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Mark::X,
            Symbol::O => Mark::O,
        }
    }
}

impl From<Option<Symbol>> for Mark {
    fn from(symbol: Option<Symbol>) -> Self {
        symbol.map_or(Mark::Empty, Mark::from)
    }
}

impl From<Mark> for &'static str {
    fn from(mark: Mark) -> Self {
        mark.as_str()
    }
}

impl FromStr for Mark {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Mark::Empty),
            "X" => Ok(Mark::X),
            "O" => Ok(Mark::O),
            other => Err(StateError::InvalidSymbol(other.to_string())),
        }
    }
}

impl TryFrom<String> for Mark {
    type Error = StateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
