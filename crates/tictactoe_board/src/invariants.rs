//! Board invariants as first-class, independently testable checks.

use crate::random::RandomSource;
use crate::{Board, BoardPiece};
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// The starting piece has placed as many pieces as its opponent, or one more.
///
/// Before a starting piece is chosen the grid must be empty.
pub struct PieceBalance;

impl<R: RandomSource> Invariant<Board<R>> for PieceBalance {
    fn holds(board: &Board<R>) -> bool {
        let count = |piece: BoardPiece| board.cells().iter().filter(|p| **p == piece).count();
        let starting = board.starting_turn();
        if !starting.is_player() {
            return board.filled_count() == 0;
        }
        let leader = count(starting);
        let follower = count(starting.opponent());

        let valid = leader == follower || leader == follower + 1;
        if !valid {
            warn!(?starting, leader, follower, "Piece balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Starting piece count equals its opponent's or leads by one"
    }
}

/// The turn is `Empty` exactly while fewer than two players have joined.
pub struct TurnConsistency;

impl<R: RandomSource> Invariant<Board<R>> for TurnConsistency {
    fn holds(board: &Board<R>) -> bool {
        let ready = board.players().len() == 2;
        let valid = ready == board.turn().is_player();
        if !valid {
            warn!(players = board.players().len(), turn = ?board.turn(), "Turn consistency violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Turn is empty exactly until two players have joined"
    }
}

/// Checks every board invariant, returning the descriptions of those violated.
#[instrument(skip(board))]
pub fn check_all<R: RandomSource>(board: &Board<R>) -> Result<(), Vec<&'static str>> {
    let mut violations = Vec::new();
    if !PieceBalance::holds(board) {
        violations.push(<PieceBalance as Invariant<Board<R>>>::description());
    }
    if !TurnConsistency::holds(board) {
        violations.push(<TurnConsistency as Invariant<Board<R>>>::description());
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
