//! Runner error types.

use crate::ConfigError;
use derive_more::{Display, Error, From};
use tictactoe_board::BoardError;

/// Anything that can stop the runner.
#[derive(Debug, Clone, Display, Error, From)]
pub enum RunnerError {
    /// The board reported a contract violation.
    #[display("Board error: {}", _0)]
    Board(BoardError),

    /// Configuration could not be loaded or is invalid.
    #[display("{}", _0)]
    Config(ConfigError),

    /// An unfinished round produced no applied move.
    #[display("Round {} stalled after {} moves", round, moves)]
    #[from(ignore)]
    Stalled {
        /// Round index.
        round: usize,
        /// Moves applied before the stall.
        moves: usize,
    },
}
