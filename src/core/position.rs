//! The nine named locations of a 3x3 grid.
//!
//! A `Position` addresses a cell inside a sub-board *and* a sub-board inside
//! the meta-board. The cell a player marks is, unchanged, the corner the
//! opponent is sent to next.
//!
//! Layout (row-major index):
//! ```text
//!   topleft(0)     topmiddle(1)     topright(2)
//!   middleleft(3)  center(4)        middleright(5)
//!   bottomleft(6)  bottommiddle(7)  bottomright(8)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::StateError;

/// A location in a 3x3 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
}

impl Position {
    /// All positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopMiddle,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomMiddle,
        Position::BottomRight,
    ];

    /// Row-major index (0-8).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position for a row-major index, `None` if out of range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Position> {
        Self::ALL.get(index).copied()
    }

    /// Position from row and column (0-2 each).
    #[must_use]
    pub fn from_row_col(row: usize, col: usize) -> Option<Position> {
        if row < 3 && col < 3 {
            Self::from_index(row * 3 + col)
        } else {
            None
        }
    }

    /// Row (0-2).
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.index() / 3
    }

    /// Column (0-2).
    #[inline]
    #[must_use]
    pub const fn col(self) -> usize {
        self.index() % 3
    }

    /// Wire name, e.g. `"topleft"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Position::TopLeft => "topleft",
            Position::TopMiddle => "topmiddle",
            Position::TopRight => "topright",
            Position::MiddleLeft => "middleleft",
            Position::Center => "center",
            Position::MiddleRight => "middleright",
            Position::BottomLeft => "bottomleft",
            Position::BottomMiddle => "bottommiddle",
            Position::BottomRight => "bottomright",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| StateError::InvalidPosition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), Some(*pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_row_col() {
        assert_eq!((Position::TopLeft.row(), Position::TopLeft.col()), (0, 0));
        assert_eq!((Position::Center.row(), Position::Center.col()), (1, 1));
        assert_eq!((Position::BottomMiddle.row(), Position::BottomMiddle.col()), (2, 1));
        assert_eq!(Position::from_row_col(1, 2), Some(Position::MiddleRight));
        assert_eq!(Position::from_row_col(3, 0), None);
    }

    #[test]
    fn test_names_match_serde() {
        for pos in Position::ALL {
            let json = serde_json::to_string(&pos).unwrap();
            assert_eq!(json, format!("\"{}\"", pos.name()));
            assert_eq!(pos.name().parse::<Position>().unwrap(), pos);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("middle".parse::<Position>().is_err());
        assert!("TopLeft".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }
}
