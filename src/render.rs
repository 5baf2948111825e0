//! Plain-text dump of a game state, for logs and debugging.
//!
//! ```text
//!  X | . | . || . | . | . || . | . | .
//!  . | . | . || . | O | . || . | . | .
//!  . | . | . || . | . | . || . | . | .
//! ===========++===========++===========
//! ...
//!
//! --- Game Status ---
//! In progress
//! Turn: X
//! Active Corner: center
//! ```

use std::fmt;

use crate::core::position::Position;
use crate::core::state::GameState;

const BAND_SEPARATOR: &str = "===========++===========++===========";

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for band in 0..3 {
            if band > 0 {
                writeln!(f, "{BAND_SEPARATOR}")?;
            }
            for row in 0..3 {
                let mut sections = Vec::with_capacity(3);
                for col in 0..3 {
                    let corner = Position::ALL[band * 3 + col];
                    let cells: Vec<String> = (0..3)
                        .map(|i| self.cell(corner, Position::ALL[row * 3 + i]).to_string())
                        .collect();
                    sections.push(cells.join(" | "));
                }
                writeln!(f, " {}", sections.join(" || "))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "--- Game Status ---")?;
        match (self.is_finished(), self.winner()) {
            (true, Some(winner)) => writeln!(f, "Winner: {winner}"),
            (true, None) => writeln!(f, "Result: DRAW"),
            (false, _) => {
                writeln!(f, "In progress")?;
                writeln!(f, "Turn: {}", self.turn())?;
                match self.active_corner() {
                    Some(corner) => writeln!(f, "Active Corner: {corner}"),
                    None => writeln!(f, "Active Corner: any"),
                }
            }
        }
    }
}
