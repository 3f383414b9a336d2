//! Value types shared by the board and its collaborators.

use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content of a single cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumIter,
)]
pub enum BoardPiece {
    /// No piece placed.
    #[default]
    Empty,
    /// The naught piece (first player identity).
    Naught,
    /// The draught piece (second player identity).
    Draught,
}

impl BoardPiece {
    /// Returns the other player piece. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            BoardPiece::Naught => BoardPiece::Draught,
            BoardPiece::Draught => BoardPiece::Naught,
            BoardPiece::Empty => BoardPiece::Empty,
        }
    }

    /// True for the two pieces a player can hold.
    pub fn is_player(self) -> bool {
        !matches!(self, BoardPiece::Empty)
    }
}

/// A coordinate on the grid: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, new)]
pub struct Cell {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Characters used for the textual board rendering.
///
/// Missing fields deserialize to their [`Glyphs::default`] values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    /// Glyph for [`BoardPiece::Naught`].
    pub naught: char,
    /// Glyph for [`BoardPiece::Draught`].
    pub draught: char,
    /// Placeholder for [`BoardPiece::Empty`].
    pub empty: char,
    /// Inserted between rows.
    pub row_separator: String,
}

impl Glyphs {
    /// Returns the glyph for a piece.
    pub fn glyph(&self, piece: BoardPiece) -> char {
        match piece {
            BoardPiece::Naught => self.naught,
            BoardPiece::Draught => self.draught,
            BoardPiece::Empty => self.empty,
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            naught: 'O',
            draught: 'X',
            empty: '.',
            row_separator: "\n".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opponent_swaps_player_pieces() {
        assert_eq!(BoardPiece::Naught.opponent(), BoardPiece::Draught);
        assert_eq!(BoardPiece::Draught.opponent(), BoardPiece::Naught);
        assert_eq!(BoardPiece::Empty.opponent(), BoardPiece::Empty);
    }

    #[test]
    fn test_default_glyphs_are_distinct() {
        let glyphs = Glyphs::default();
        let seen: HashSet<char> = BoardPiece::iter().map(|p| glyphs.glyph(p)).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(2, 0).to_string(), "(2, 0)");
    }
}
