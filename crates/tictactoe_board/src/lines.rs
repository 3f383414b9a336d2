//! Candidate winning lines for an NxN grid.
//!
//! Scan order is fixed: rows by index, columns by index, the main diagonal,
//! then the anti-diagonal. Every consumer that needs "the first winning
//! line" relies on this order.

use crate::{BoardPiece, Cell};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which row, column or diagonal a line covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Row `y`, left to right.
    Row(usize),
    /// Column `x`, top to bottom.
    Column(usize),
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl LineKind {
    /// Cell at step `i` along this line on a board of `size`.
    fn cell_at(self, i: usize, size: usize) -> Cell {
        match self {
            LineKind::Row(y) => Cell::new(i, y),
            LineKind::Column(x) => Cell::new(x, i),
            LineKind::MainDiagonal => Cell::new(i, i),
            LineKind::AntiDiagonal => Cell::new(size - 1 - i, i),
        }
    }

    /// Cells covered by this line, in walking order.
    pub fn cells(self, size: usize) -> impl Iterator<Item = Cell> {
        (0..size).map(move |i| self.cell_at(i, size))
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Row(y) => write!(f, "row {}", y),
            LineKind::Column(x) => write!(f, "column {}", x),
            LineKind::MainDiagonal => write!(f, "main diagonal"),
            LineKind::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// Every candidate line of a `size` x `size` board, in scan order.
///
/// Yields `2 * size + 2` kinds.
pub fn winning_lines(size: usize) -> impl Iterator<Item = LineKind> {
    (0..size)
        .map(LineKind::Row)
        .chain((0..size).map(LineKind::Column))
        .chain([LineKind::MainDiagonal, LineKind::AntiDiagonal])
}

/// A cell of a line together with its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCell {
    /// Where the cell is.
    pub cell: Cell,
    /// What it holds.
    pub piece: BoardPiece,
}

/// A materialized candidate line: its kind plus the coordinate-tagged cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    kind: LineKind,
    cells: Vec<LineCell>,
}

impl Line {
    pub(crate) fn new(kind: LineKind, cells: Vec<LineCell>) -> Self {
        Self { kind, cells }
    }

    /// Which row, column or diagonal this is.
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// The cells in walking order.
    pub fn cells(&self) -> &[LineCell] {
        &self.cells
    }

    /// Number of cells (the board size).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True only for a line over a zero-sized board, which a [`crate::Board`] never builds.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The shared piece when every cell holds the same non-empty piece.
    pub fn uniform_piece(&self) -> Option<BoardPiece> {
        let first = self.cells.first()?.piece;
        if first.is_player() && self.cells.iter().all(|c| c.piece == first) {
            Some(first)
        } else {
            None
        }
    }

    /// First and last cell: the two ends of a strike-through drawn over the line.
    pub fn endpoints(&self) -> Option<(Cell, Cell)> {
        Some((self.cells.first()?.cell, self.cells.last()?.cell))
    }

    /// True when `cell` lies on this line.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.iter().any(|c| c.cell == cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_is_two_n_plus_two() {
        for size in 1..=6 {
            assert_eq!(winning_lines(size).count(), 2 * size + 2);
        }
    }

    #[test]
    fn test_scan_order() {
        let kinds: Vec<_> = winning_lines(2).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Row(0),
                LineKind::Row(1),
                LineKind::Column(0),
                LineKind::Column(1),
                LineKind::MainDiagonal,
                LineKind::AntiDiagonal,
            ]
        );
    }

    #[test]
    fn test_diagonal_geometry() {
        let main: Vec<_> = LineKind::MainDiagonal.cells(3).collect();
        assert_eq!(main, vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)]);

        let anti: Vec<_> = LineKind::AntiDiagonal.cells(3).collect();
        assert_eq!(anti, vec![Cell::new(2, 0), Cell::new(1, 1), Cell::new(0, 2)]);
    }

    #[test]
    fn test_uniform_piece_ignores_empty_lines() {
        let blank = Line::new(
            LineKind::Row(0),
            LineKind::Row(0)
                .cells(3)
                .map(|cell| LineCell { cell, piece: BoardPiece::Empty })
                .collect(),
        );
        assert_eq!(blank.uniform_piece(), None);

        let full = Line::new(
            LineKind::Column(1),
            LineKind::Column(1)
                .cells(3)
                .map(|cell| LineCell { cell, piece: BoardPiece::Draught })
                .collect(),
        );
        assert_eq!(full.uniform_piece(), Some(BoardPiece::Draught));
        assert_eq!(full.endpoints(), Some((Cell::new(1, 0), Cell::new(1, 2))));
        assert!(full.contains(Cell::new(1, 1)));
        assert!(!full.contains(Cell::new(0, 1)));
    }
}
