//! Contract violations raised by the board.

use derive_more::{Display, Error};

/// Programmer-contract violations.
///
/// Gameplay-rule violations (occupied cell, wrong turn, finished board) are
/// not errors; they surface as [`crate::Rejection`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Starting-turn selection needs exactly two registered players.
    #[display("There must be two players to play a game of tic-tac-toe")]
    InsufficientPlayers,

    /// A third player tried to join.
    #[display("A game of tic-tac-toe takes exactly two players")]
    TooManyPlayers,

    /// A coordinate lies outside `[0, size)`.
    #[display("Cell ({}, {}) is outside a {}x{} board", x, y, size, size)]
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Board dimension.
        size: usize,
    },

    /// Boards must be at least 1x1.
    #[display("Board size must be at least 1")]
    InvalidSize,
}
