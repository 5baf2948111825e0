//! Line-based evaluation of a single 3x3 grid.
//!
//! The same functions judge a sub-board (its cells) and the meta-board
//! (the winners of its sub-boards). They hold no state and never fail.

use serde::{Deserialize, Serialize};

use crate::core::position::Position;
use crate::core::symbol::{Mark, Symbol};

use Position::*;

/// The eight winning lines, in tie-break order: rows top-to-bottom,
/// columns left-to-right, then the two diagonals.
pub const LINES: [[Position; 3]; 8] = [
    [TopLeft, TopMiddle, TopRight],
    [MiddleLeft, Center, MiddleRight],
    [BottomLeft, BottomMiddle, BottomRight],
    [TopLeft, MiddleLeft, BottomLeft],
    [TopMiddle, Center, BottomMiddle],
    [TopRight, MiddleRight, BottomRight],
    [TopLeft, Center, BottomRight],
    [TopRight, Center, BottomLeft],
];

/// Result of evaluating one grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won(Symbol),
    Draw,
}

impl Outcome {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning symbol, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Symbol> {
        match self {
            Outcome::Won(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Rebuild from stored `finished`/`winner` fields.
    #[must_use]
    pub const fn from_parts(finished: bool, winner: Option<Symbol>) -> Outcome {
        match (finished, winner) {
            (_, Some(symbol)) => Outcome::Won(symbol),
            (true, None) => Outcome::Draw,
            (false, None) => Outcome::InProgress,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Won(symbol) => write!(f, "won by {symbol}"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// The first complete line, in `LINES` order, and who holds it.
#[must_use]
pub fn winning_line(cells: &[Mark; 9]) -> Option<([Position; 3], Symbol)> {
    LINES.into_iter().find_map(|line| {
        let [a, b, c] = line.map(|p| cells[p.index()]);
        match a.symbol() {
            Some(symbol) if a == b && b == c => Some((line, symbol)),
            _ => None,
        }
    })
}

/// The symbol holding the first complete line, if any.
#[must_use]
pub fn line_winner(cells: &[Mark; 9]) -> Option<Symbol> {
    winning_line(cells).map(|(_, symbol)| symbol)
}

/// Evaluate a grid: a complete line wins, a full grid without one is a draw.
#[must_use]
pub fn evaluate(cells: &[Mark; 9]) -> Outcome {
    if let Some(symbol) = line_winner(cells) {
        Outcome::Won(symbol)
    } else if cells.iter().all(|c| !c.is_empty()) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(s: &str) -> [Mark; 9] {
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
    fn test_empty_grid_in_progress() {
        assert_eq!(evaluate(&[Mark::Empty; 9]), Outcome::InProgress);
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let mut cells = [Mark::Empty; 9];
            for p in line {
                cells[p.index()] = Mark::O;
            }
            assert_eq!(evaluate(&cells), Outcome::Won(Symbol::O), "line {line:?}");
            assert_eq!(winning_line(&cells), Some((line, Symbol::O)));
        }
    }

    #[test]
    fn test_full_grid_without_line_is_draw() {
        let cells = grid("XOX XOO OXX");
        assert_eq!(evaluate(&cells), Outcome::Draw);
    }

    #[test]
    fn test_win_on_full_grid_beats_draw() {
        let cells = grid("XXX OOX OXO");
        assert_eq!(evaluate(&cells), Outcome::Won(Symbol::X));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let cells = grid("XXO ... ...");
        assert_eq!(evaluate(&cells), Outcome::InProgress);
        assert_eq!(line_winner(&cells), None);
    }

    #[test]
    fn test_multiple_lines_first_in_order_wins() {
        // Top row is O, left column is X: unreachable, but rows come first.
        let cells = grid("OOO X.. X..");
        assert_eq!(line_winner(&cells), Some(Symbol::O));

        let cells = grid("X.O X.O X.O");
        assert_eq!(winning_line(&cells), Some((LINES[3], Symbol::X)));

        // Diagonals are checked last.
        let cells = grid("XOO .XO ..X");
        assert_eq!(winning_line(&cells).map(|(l, _)| l), Some(LINES[6]));
        let cells = grid("O.X OX. XOO");
        assert_eq!(winning_line(&cells), Some((LINES[7], Symbol::X)));
    }

    #[test]
    fn test_outcome_from_parts() {
        assert_eq!(Outcome::from_parts(false, None), Outcome::InProgress);
        assert_eq!(Outcome::from_parts(true, None), Outcome::Draw);
        assert_eq!(Outcome::from_parts(true, Some(Symbol::X)), Outcome::Won(Symbol::X));
        assert!(Outcome::Draw.is_finished());
        assert_eq!(Outcome::Won(Symbol::O).winner(), Some(Symbol::O));
        assert_eq!(Outcome::Draw.winner(), None);
    }
}
