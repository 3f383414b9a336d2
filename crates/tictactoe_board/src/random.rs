//! Pluggable randomness for piece assignment, turn selection and random moves.

use crate::BoardPiece;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Source of every random decision the board makes.
pub trait RandomSource {
    /// Picks [`BoardPiece::Naught`] or [`BoardPiece::Draught`] uniformly.
    fn pick_piece(&mut self) -> BoardPiece;

    /// Picks an index uniformly from `0..len`. Callers guarantee `len >= 1`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Production source: [`RngSource`] over the standard generator.
pub type StdSource = RngSource<StdRng>;

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for a given seed.
    #[instrument]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from operating system entropy.
    #[instrument]
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_piece(&mut self) -> BoardPiece {
        if self.rng.random_bool(0.5) {
            BoardPiece::Naught
        } else {
            BoardPiece::Draught
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed script of decisions.
///
/// Once a script runs dry, pieces fall back to `Naught` and indices to `0`.
/// Scripted indices are clamped into range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    pieces: VecDeque<BoardPiece>,
    indices: VecDeque<usize>,
}

impl ScriptedSource {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends pieces returned by successive [`RandomSource::pick_piece`] calls.
    ///
    /// `Empty` entries are skipped; a random source never yields `Empty`.
    pub fn with_pieces(mut self, pieces: impl IntoIterator<Item = BoardPiece>) -> Self {
        self.pieces
            .extend(pieces.into_iter().filter(|p| p.is_player()));
        self
    }

    /// Appends indices returned by successive [`RandomSource::pick_index`] calls.
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }
}

impl RandomSource for ScriptedSource {
    fn pick_piece(&mut self) -> BoardPiece {
        self.pieces.pop_front().unwrap_or(BoardPiece::Naught)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let index = self.indices.pop_front().unwrap_or(0);
        if index >= len {
            debug!(index, len, "Scripted index clamped");
        }
        index.min(len.saturating_sub(1))
    }
}
