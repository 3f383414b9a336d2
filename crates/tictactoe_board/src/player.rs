//! Players and their move requests.

use crate::random::RandomSource;
use crate::{Board, BoardError, BoardPiece, Cell, MoveOutcome, Rejection};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A participant holding one piece identity.
///
/// Players never hold a reference to a board; the caller passes the board
/// in for every request. Only the board hands out players, so both pieces
/// of a roster are always distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    piece: BoardPiece,
}

impl Player {
    pub(crate) fn new(piece: BoardPiece) -> Self {
        Self { piece }
    }

    /// Returns the piece this player places.
    pub fn piece(&self) -> BoardPiece {
        self.piece
    }

    /// Requests a move at column `x`, row `y` if it is this player's turn.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] for coordinates outside the grid.
    #[instrument(skip(board))]
    pub fn play<R: RandomSource>(
        &self,
        x: usize,
        y: usize,
        board: &mut Board<R>,
    ) -> Result<MoveOutcome, BoardError> {
        if board.turn() != self.piece {
            return Ok(MoveOutcome::Rejected(Rejection::WrongTurn));
        }
        board.player_make_move(x, y, *self)
    }

    /// Requests a random move if it is this player's turn.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Board::player_move_random`].
    #[instrument(skip(board))]
    pub fn play_random<R: RandomSource>(
        &self,
        board: &mut Board<R>,
    ) -> Result<Option<Cell>, BoardError> {
        if board.turn() != self.piece {
            return Ok(None);
        }
        board.player_move_random(*self)
    }
}
