//! NxN tic-tac-toe board state machine.
//!
//! The [`Board`] owns the grid, the two-player roster and the turn pointer.
//! Moves flow through a single validate-then-apply operation, and win
//! detection scans a parametric set of candidate lines: every row, every
//! column, then the main and anti diagonals.
//!
//! # Example
//!
//! ```
//! use tictactoe_board::{Board, BoardPiece, RngSource};
//!
//! # fn example() -> Result<(), tictactoe_board::BoardError> {
//! let mut board = Board::with_source(3, RngSource::from_seed(7))?;
//! let (first, _) = board.new_player()?;
//! let (second, turn) = board.new_player()?;
//! assert_ne!(first.piece(), second.piece());
//! assert_ne!(turn, BoardPiece::Empty);
//!
//! while !board.is_finished() {
//!     let mover = if board.turn() == first.piece() { first } else { second };
//!     board.player_move_random(mover)?;
//! }
//! println!("{board}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod invariants;
mod lines;
mod player;
mod random;
mod types;

pub use board::{Board, GameStatus, MoveOutcome, Rejection};
pub use error::BoardError;
pub use invariants::{Invariant, PieceBalance, TurnConsistency, check_all};
pub use lines::{Line, LineCell, LineKind, winning_lines};
pub use player::Player;
pub use random::{RandomSource, RngSource, ScriptedSource, StdSource};
pub use types::{BoardPiece, Cell, Glyphs};
