//! Game rules.
//!
//! - `board`: win/draw evaluation of one 3x3 grid, shared by sub-boards and
//!   the meta-board
//! - `engine`: move legality, state transitions, legal move generation

pub mod board;
pub mod engine;

pub use board::{evaluate, line_winner, winning_line, Outcome, LINES};
pub use engine::{apply_move, check_move, is_legal, legal_moves, meta_outcome, UltimateEngine};
