//! A chess position model and legal move engine.
//!
//! Positions are plain immutable values: making a move returns a new
//! [`Position`](board::Position) rather than mutating the old one, which makes
//! undo a matter of dropping the latest value and lets any number of threads
//! analyse positions without locks. [`GameState`](game::GameState) layers move
//! history and game termination rules on top.
//!
//! ```
//! use schack_core::{board::Square, game::{GameState, GameStatus}};
//!
//! let mut game = GameState::new();
//! assert_eq!(game.legal_moves().len(), 20);
//!
//! let e4 = game.current().find_move(Square::E2, Square::E4, None).unwrap();
//! assert_eq!(game.submit_move(e4), Ok(GameStatus::InProgress));
//! assert_eq!(
//!     game.current_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! );
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod move_gen;
pub mod perft;

#[cfg(test)]
mod test_utils;

pub use error::ChessError;
