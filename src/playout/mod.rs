//! Seeded random playouts.
//!
//! Used to drive property tests and benchmarks through real game
//! trajectories, and by hosts that need a stand-in opponent.
//!
//! ## Usage
//!
//! ```rust
//! use ultimate_ttt::playout::random_playout;
//! use ultimate_ttt::rules::UltimateEngine;
//!
//! let record = random_playout(&UltimateEngine::default(), 42);
//! assert!(record.current().is_finished());
//! ```

pub mod random;
pub mod rng;

pub use random::{play_out, random_move, random_playout, random_playouts};
pub use rng::GameRng;
