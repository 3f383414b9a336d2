//! The board state machine.

use crate::invariants::check_all;
use crate::lines::{Line, LineCell, winning_lines};
use crate::random::{RandomSource, RngSource, StdSource};
use crate::{BoardError, BoardPiece, Cell, Glyphs, Player};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument, warn};

/// Why an in-bounds move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// The board already has a winner or is full.
    #[display("Game is already over")]
    GameOver,
    /// The target cell holds a piece.
    #[display("Cell is already occupied")]
    Occupied,
    /// The mover's piece is not the current turn.
    #[display("It is not this player's turn")]
    WrongTurn,
}

/// Result of an in-bounds move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The piece was placed and the turn flipped.
    Applied,
    /// The request broke a gameplay rule and changed nothing.
    Rejected(Rejection),
}

impl MoveOutcome {
    /// True when the move changed the board.
    pub fn is_applied(self) -> bool {
        matches!(self, MoveOutcome::Applied)
    }
}

/// Summary of where a round stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves remain and nobody has won.
    InProgress,
    /// `piece` completed `line`.
    Won {
        /// The winning piece.
        piece: BoardPiece,
        /// The first uniform line in scan order.
        line: Line,
    },
    /// Full board, no uniform line.
    Draw,
}

/// An NxN tic-tac-toe board with its player roster and turn pointer.
///
/// The grid is stored row-major and only changes through
/// [`Board::player_make_move`] and [`Board::reset_game`].
#[derive(Debug, Clone)]
pub struct Board<R = StdSource> {
    size: usize,
    grid: Vec<BoardPiece>,
    players: Vec<Player>,
    turn: BoardPiece,
    starting: BoardPiece,
    changed: bool,
    source: R,
}

impl Board {
    /// Creates an empty board of `size` x `size` backed by OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] when `size` is zero.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Self::with_source(size, RngSource::from_os())
    }
}

impl<R: RandomSource> Board<R> {
    /// Creates an empty board that draws every random decision from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] when `size` is zero.
    #[instrument(skip(source))]
    pub fn with_source(size: usize, source: R) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize);
        }
        Ok(Self {
            size,
            grid: vec![BoardPiece::Empty; size * size],
            players: Vec::with_capacity(2),
            turn: BoardPiece::Empty,
            starting: BoardPiece::Empty,
            changed: false,
            source,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Board dimension N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Piece allowed to move next; `Empty` until two players have joined.
    pub fn turn(&self) -> BoardPiece {
        self.turn
    }

    /// Piece that moves first this round; `Empty` until two players have joined.
    pub fn starting_turn(&self) -> BoardPiece {
        self.starting
    }

    /// Registered players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Row-major snapshot of the grid: index `y * size + x`.
    pub fn cells(&self) -> &[BoardPiece] {
        &self.grid
    }

    /// Grid as rows of pieces.
    pub fn rows(&self) -> impl Iterator<Item = &[BoardPiece]> {
        self.grid.chunks(self.size)
    }

    /// Piece at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] for coordinates outside the grid.
    pub fn piece_at(&self, x: usize, y: usize) -> Result<BoardPiece, BoardError> {
        let index = self.index(x, y)?;
        Ok(self.grid[index])
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.grid.iter().filter(|p| p.is_player()).count()
    }

    /// Returns whether the board changed since the last call, clearing the flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        if x >= self.size || y >= self.size {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        Ok(y * self.size + x)
    }

    // ─────────────────────────────────────────────────────────────
    //  Players and turns
    // ─────────────────────────────────────────────────────────────

    /// Admits a player and returns it with the starting turn.
    ///
    /// The first player gets a random piece, the second the complement.
    /// Once the second player joins the starting turn is drawn and
    /// returned; before that the returned turn is `Empty`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TooManyPlayers`] when two players already joined.
    #[instrument(skip(self), fields(joined = self.players.len()))]
    pub fn new_player(&mut self) -> Result<(Player, BoardPiece), BoardError> {
        let piece = match self.players.as_slice() {
            [] => self.source.pick_piece(),
            [first] => first.piece().opponent(),
            _ => return Err(BoardError::TooManyPlayers),
        };
        let player = Player::new(piece);
        self.players.push(player);
        debug!(?piece, "Player joined");

        let turn = if self.players.len() == 2 {
            self.choose_starting_turn()?
        } else {
            BoardPiece::Empty
        };
        Ok((player, turn))
    }

    /// Draws the starting turn uniformly, independent of join order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InsufficientPlayers`] unless exactly two players joined.
    #[instrument(skip(self))]
    pub fn choose_starting_turn(&mut self) -> Result<BoardPiece, BoardError> {
        if self.players.len() != 2 {
            return Err(BoardError::InsufficientPlayers);
        }
        self.turn = self.source.pick_piece();
        self.starting = self.turn;
        debug!(turn = ?self.turn, "Starting turn chosen");
        Ok(self.turn)
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// True iff the cell is empty and it is `player`'s turn.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] for coordinates outside the grid.
    #[instrument(skip(self))]
    pub fn is_valid_move(&self, x: usize, y: usize, player: Player) -> Result<bool, BoardError> {
        let index = self.index(x, y)?;
        Ok(self.rule_check(index, player).is_none())
    }

    fn rule_check(&self, index: usize, player: Player) -> Option<Rejection> {
        if self.grid[index] != BoardPiece::Empty {
            Some(Rejection::Occupied)
        } else if player.piece() != self.turn {
            Some(Rejection::WrongTurn)
        } else {
            None
        }
    }

    /// Validates and applies a move.
    ///
    /// Rule violations (finished board, occupied cell, wrong turn) leave the
    /// board untouched and come back as [`MoveOutcome::Rejected`]. A move that
    /// applies flips the turn and raises the changed flag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] for coordinates outside the grid.
    #[instrument(skip(self), fields(turn = ?self.turn))]
    pub fn player_make_move(
        &mut self,
        x: usize,
        y: usize,
        player: Player,
    ) -> Result<MoveOutcome, BoardError> {
        let index = self.index(x, y)?;

        let rejection = if self.is_finished() {
            Some(Rejection::GameOver)
        } else {
            self.rule_check(index, player)
        };
        if let Some(reason) = rejection {
            debug!(%reason, "Move ignored");
            return Ok(MoveOutcome::Rejected(reason));
        }

        self.grid[index] = player.piece();
        self.turn = player.piece().opponent();
        self.changed = true;

        let invariants = check_all(self);
        if let Err(violations) = &invariants {
            warn!(?violations, "Board invariants violated after move");
        }
        debug_assert!(invariants.is_ok(), "Board invariants violated after move");
        Ok(MoveOutcome::Applied)
    }

    /// Plays `player` on a uniformly chosen empty cell.
    ///
    /// Returns the cell played, or `None` when it is not `player`'s turn,
    /// the board is finished, or no empty cell remains. No random draw is
    /// taken in those cases.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError::OutOfBounds`], which cannot occur for cells
    /// taken from [`Board::get_empty_spaces`].
    #[instrument(skip(self))]
    pub fn player_move_random(&mut self, player: Player) -> Result<Option<Cell>, BoardError> {
        if player.piece() != self.turn || self.is_finished() {
            debug!(turn = ?self.turn, "Random move ignored");
            return Ok(None);
        }
        let empty = self.get_empty_spaces();
        if empty.is_empty() {
            debug!("No empty cells left");
            return Ok(None);
        }
        let cell = empty[self.source.pick_index(empty.len())];
        let outcome = self.player_make_move(cell.x, cell.y, player)?;
        Ok(outcome.is_applied().then_some(cell))
    }

    /// Clears the grid and the roster; the turn reverts to `Empty`.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.grid.fill(BoardPiece::Empty);
        self.players.clear();
        self.turn = BoardPiece::Empty;
        self.starting = BoardPiece::Empty;
        self.changed = true;
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Lazily yields every candidate line (`2N + 2` of them) in scan order.
    pub fn get_winning_areas(&self) -> impl Iterator<Item = Line> + '_ {
        winning_lines(self.size).map(move |kind| {
            let cells = kind
                .cells(self.size)
                .map(|cell| LineCell {
                    cell,
                    piece: self.grid[cell.y * self.size + cell.x],
                })
                .collect();
            Line::new(kind, cells)
        })
    }

    /// The first uniform line in scan order, if any.
    pub fn get_win_area(&self) -> Option<Line> {
        self.get_winning_areas()
            .find(|line| line.uniform_piece().is_some())
    }

    /// Piece of the first uniform line, or `Empty` for both "playing" and "tie".
    pub fn get_winner(&self) -> BoardPiece {
        self.get_win_area()
            .and_then(|line| line.uniform_piece())
            .unwrap_or(BoardPiece::Empty)
    }

    /// True when a line is uniform or no empty cell remains.
    pub fn is_finished(&self) -> bool {
        !self.grid.contains(&BoardPiece::Empty) || self.get_win_area().is_some()
    }

    /// All empty cells in row-major order.
    pub fn get_empty_spaces(&self) -> Vec<Cell> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, piece)| **piece == BoardPiece::Empty)
            .map(|(i, _)| Cell::new(i % self.size, i / self.size))
            .collect()
    }

    /// Combined view: a win takes precedence over a full board.
    pub fn status(&self) -> GameStatus {
        if let Some(line) = self.get_win_area() {
            let piece = line.uniform_piece().unwrap_or(BoardPiece::Empty);
            GameStatus::Won { piece, line }
        } else if self.is_finished() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Renders one glyph per cell, rows joined by the glyph set's separator.
    pub fn render(&self, glyphs: &Glyphs) -> String {
        self.rows()
            .map(|row| row.iter().map(|p| glyphs.glyph(*p)).collect::<String>())
            .collect::<Vec<_>>()
            .join(&glyphs.row_separator)
    }
}

impl<R: RandomSource> fmt::Display for Board<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Glyphs::default()))
    }
}

#[cfg(test)]
impl<R: RandomSource> Board<R> {
    /// Writes a piece without any validation, for corrupting state in tests.
    pub(crate) fn force_piece(&mut self, x: usize, y: usize, piece: BoardPiece) {
        let index = y * self.size + x;
        self.grid[index] = piece;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    /// Board with Naught joining first and Naught starting.
    fn scripted(size: usize) -> (Board<ScriptedSource>, Player, Player) {
        let source = ScriptedSource::new().with_pieces([BoardPiece::Naught, BoardPiece::Naught]);
        let mut board = Board::with_source(size, source).unwrap();
        let (naught, _) = board.new_player().unwrap();
        let (draught, turn) = board.new_player().unwrap();
        assert_eq!(turn, BoardPiece::Naught);
        (board, naught, draught)
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            Board::with_source(0, ScriptedSource::new()).unwrap_err(),
            BoardError::InvalidSize
        );
    }

    #[test]
    fn test_second_player_gets_complement() {
        let source = ScriptedSource::new().with_pieces([BoardPiece::Draught, BoardPiece::Naught]);
        let mut board = Board::with_source(3, source).unwrap();
        let (first, turn) = board.new_player().unwrap();
        assert_eq!(first.piece(), BoardPiece::Draught);
        assert_eq!(turn, BoardPiece::Empty);
        assert_eq!(board.turn(), BoardPiece::Empty);

        let (second, turn) = board.new_player().unwrap();
        assert_eq!(second.piece(), BoardPiece::Naught);
        assert_eq!(turn, BoardPiece::Naught);
        assert_eq!(board.turn(), BoardPiece::Naught);
    }

    #[test]
    fn test_choose_starting_turn_needs_two_players() {
        let mut board = Board::with_source(3, ScriptedSource::new()).unwrap();
        assert_eq!(board.choose_starting_turn(), Err(BoardError::InsufficientPlayers));
        board.new_player().unwrap();
        assert_eq!(board.choose_starting_turn(), Err(BoardError::InsufficientPlayers));
    }

    #[test]
    fn test_rejections_are_classified() {
        let (mut board, naught, draught) = scripted(3);
        assert_eq!(
            board.player_make_move(0, 0, draught).unwrap(),
            MoveOutcome::Rejected(Rejection::WrongTurn)
        );
        assert_eq!(board.player_make_move(0, 0, naught).unwrap(), MoveOutcome::Applied);
        assert_eq!(
            board.player_make_move(0, 0, draught).unwrap(),
            MoveOutcome::Rejected(Rejection::Occupied)
        );
    }

    #[test]
    fn test_finished_board_rejects_moves() {
        let (mut board, naught, draught) = scripted(1);
        assert!(board.player_make_move(0, 0, naught).unwrap().is_applied());
        assert!(board.is_finished());
        assert_eq!(board.get_winner(), BoardPiece::Naught);
        assert_eq!(
            board.player_make_move(0, 0, draught).unwrap(),
            MoveOutcome::Rejected(Rejection::GameOver)
        );
        board.reset_game();
        assert!(!board.is_finished());
        assert_eq!(
            board.player_make_move(0, 0, draught).unwrap(),
            MoveOutcome::Rejected(Rejection::WrongTurn)
        );
    }

    #[test]
    fn test_changed_flag() {
        let (mut board, naught, draught) = scripted(3);
        assert!(!board.take_changed());
        board.player_make_move(1, 1, draught).unwrap();
        assert!(!board.take_changed());
        board.player_make_move(1, 1, naught).unwrap();
        assert!(board.take_changed());
        assert!(!board.take_changed());
        board.reset_game();
        assert!(board.take_changed());
    }

    #[test]
    fn test_move_random_uses_scripted_index() {
        let source = ScriptedSource::new()
            .with_pieces([BoardPiece::Naught, BoardPiece::Naught])
            .with_indices([4]);
        let mut board = Board::with_source(3, source).unwrap();
        let (naught, _) = board.new_player().unwrap();
        board.new_player().unwrap();

        let played = board.player_move_random(naught).unwrap();
        assert_eq!(played, Some(Cell::new(1, 1)));
        assert_eq!(board.piece_at(1, 1).unwrap(), BoardPiece::Naught);
    }

    #[test]
    fn test_ignored_random_move_leaves_source_untouched() {
        let source = ScriptedSource::new()
            .with_pieces([BoardPiece::Naught, BoardPiece::Naught])
            .with_indices([8, 4]);
        let mut board = Board::with_source(3, source).unwrap();
        let (naught, _) = board.new_player().unwrap();
        let (draught, _) = board.new_player().unwrap();

        // Out of turn: no index is consumed.
        assert_eq!(board.player_move_random(draught).unwrap(), None);
        assert_eq!(board.player_move_random(naught).unwrap(), Some(Cell::new(2, 2)));
        assert_eq!(board.player_move_random(draught).unwrap(), Some(Cell::new(1, 1)));
        assert_eq!(board.starting_turn(), BoardPiece::Naught);
    }

    #[test]
    fn test_finished_board_skips_random_draw() {
        let source = ScriptedSource::new()
            .with_pieces([BoardPiece::Naught, BoardPiece::Naught])
            .with_indices([0, 3, 1, 2, 0]);
        let mut board = Board::with_source(3, source).unwrap();
        let (naught, _) = board.new_player().unwrap();
        let (draught, _) = board.new_player().unwrap();
        // Naught takes row 0: (0,0), (1,0), (2,0); draught answers on row 1.
        for mover in [naught, draught, naught, draught, naught] {
            assert!(board.player_move_random(mover).unwrap().is_some());
        }
        assert_eq!(board.get_winner(), BoardPiece::Naught);
        assert_eq!(board.player_move_random(draught).unwrap(), None);
        board.reset_game();
        assert_eq!(board.starting_turn(), BoardPiece::Empty);
    }

    #[test]
    fn test_render_uses_glyphs() {
        let (mut board, naught, draught) = scripted(2);
        board.player_make_move(0, 0, naught).unwrap();
        board.player_make_move(1, 1, draught).unwrap();
        assert_eq!(board.to_string(), "O.\n.X");

        let glyphs = Glyphs {
            naught: 'n',
            draught: 'd',
            empty: '_',
            row_separator: "|".to_string(),
        };
        assert_eq!(board.render(&glyphs), "n_|_d");
    }

    #[test]
    fn test_status_reports_win_line() {
        let (mut board, naught, draught) = scripted(2);
        board.player_make_move(0, 0, naught).unwrap();
        board.player_make_move(1, 0, draught).unwrap();
        board.player_make_move(0, 1, naught).unwrap();
        match board.status() {
            GameStatus::Won { piece, line } => {
                assert_eq!(piece, BoardPiece::Naught);
                assert_eq!(line.kind(), crate::LineKind::Column(0));
            }
            other => panic!("expected a win, got {:?}", other),
        }
    }
}
