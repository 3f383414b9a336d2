//! Round loop: seat two random players, play to the finish, reset.

use crate::{RunnerConfig, RunnerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tictactoe_board::{
    Board, BoardPiece, GameStatus, Line, Player, RandomSource, RngSource, StdSource,
};
use tracing::{debug, info, instrument};

/// What happened in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 1-based round index.
    pub round: usize,
    /// Piece that moved first.
    pub starting_piece: BoardPiece,
    /// Winning piece, `Empty` for a draw.
    pub winner: BoardPiece,
    /// Line to strike through, absent for a draw.
    pub win_line: Option<Line>,
    /// Number of applied moves.
    pub moves: usize,
    /// Final board rendered with the configured glyphs.
    pub board: String,
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.win_line {
            Some(line) => writeln!(
                f,
                "Round {}: {:?} wins on {} after {} moves ({:?} started)",
                self.round,
                self.winner,
                line.kind(),
                self.moves,
                self.starting_piece
            )?,
            None => writeln!(
                f,
                "Round {}: draw after {} moves ({:?} started)",
                self.round, self.moves, self.starting_piece
            )?,
        }
        write!(f, "{}", self.board)
    }
}

/// Win/draw counts across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Rounds won by naught.
    pub naught_wins: usize,
    /// Rounds won by draught.
    pub draught_wins: usize,
    /// Rounds ending on a full board without a line.
    pub draws: usize,
}

impl Tally {
    /// Counts one finished round.
    pub fn record(&mut self, summary: &RoundSummary) {
        match summary.winner {
            BoardPiece::Naught => self.naught_wins += 1,
            BoardPiece::Draught => self.draught_wins += 1,
            BoardPiece::Empty => self.draws += 1,
        }
    }

    /// Total rounds recorded.
    pub fn rounds(&self) -> usize {
        self.naught_wins + self.draught_wins + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "naught {} / draught {} / draw {}",
            self.naught_wins, self.draught_wins, self.draws
        )
    }
}

/// Drives a board through repeated rounds.
#[derive(Debug)]
pub struct Runner<R = StdSource> {
    config: RunnerConfig,
    board: Board<R>,
    rounds_played: usize,
}

impl Runner {
    /// Builds a runner seeded from the config, or from OS entropy without a seed.
    #[instrument(skip(config), fields(board_size = config.board_size(), seed = ?config.seed()))]
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let source = match config.seed() {
            Some(seed) => RngSource::from_seed(*seed),
            None => RngSource::from_os(),
        };
        Self::with_source(config, source)
    }
}

impl<R: RandomSource> Runner<R> {
    /// Builds a runner whose board draws from `source`.
    #[instrument(skip(config, source))]
    pub fn with_source(config: RunnerConfig, source: R) -> Result<Self, RunnerError> {
        config.validate()?;
        let board = Board::with_source(*config.board_size(), source)?;
        Ok(Self {
            config,
            board,
            rounds_played: 0,
        })
    }

    /// The board between rounds.
    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    /// Rounds completed so far.
    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Plays one round to the finish, then resets the board.
    #[instrument(skip(self), fields(round = self.rounds_played + 1))]
    pub fn play_round(&mut self) -> Result<RoundSummary, RunnerError> {
        let round = self.rounds_played + 1;
        let (first, _) = self.board.new_player()?;
        let (second, starting_piece) = self.board.new_player()?;
        let players = [first, second];
        debug!(?starting_piece, "Players seated");

        let mut moves = 0;
        while !self.board.is_finished() {
            let mover: Option<Player> = players
                .iter()
                .copied()
                .find(|p| p.piece() == self.board.turn());
            let played = match mover {
                Some(player) => player.play_random(&mut self.board)?,
                None => None,
            };
            let Some(cell) = played else {
                self.board.reset_game();
                return Err(RunnerError::Stalled { round, moves });
            };
            moves += 1;
            debug!(%cell, "Move applied");
        }

        let (winner, win_line) = match self.board.status() {
            GameStatus::Won { piece, line } => (piece, Some(line)),
            _ => (BoardPiece::Empty, None),
        };
        let summary = RoundSummary {
            round,
            starting_piece,
            winner,
            win_line,
            moves,
            board: self.board.render(self.config.glyphs()),
        };
        info!(?winner, moves, "Round finished");

        self.board.reset_game();
        self.rounds_played = round;
        Ok(summary)
    }

    /// Plays the configured number of rounds, handing each summary to `on_round`.
    #[instrument(skip(self, on_round), fields(rounds = self.config.rounds()))]
    pub fn run(
        &mut self,
        mut on_round: impl FnMut(&RoundSummary),
    ) -> Result<Tally, RunnerError> {
        let mut tally = Tally::default();
        let tick = Duration::from_millis(*self.config.tick_millis());
        for i in 0..*self.config.rounds() {
            if i > 0 && !tick.is_zero() {
                std::thread::sleep(tick);
            }
            let summary = self.play_round()?;
            tally.record(&summary);
            on_round(&summary);
        }
        info!(%tally, "Run complete");
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_board::ScriptedSource;

    #[test]
    fn test_scripted_round_fills_row_major() {
        // Naught joins and starts; every random pick takes the first empty cell.
        let source = ScriptedSource::new().with_pieces([BoardPiece::Naught, BoardPiece::Naught]);
        let mut runner = Runner::with_source(RunnerConfig::default(), source).unwrap();
        let summary = runner.play_round().unwrap();

        // O X O / X O X / O: naught completes the anti-diagonal on move 7.
        assert_eq!(summary.winner, BoardPiece::Naught);
        assert_eq!(summary.moves, 7);
        assert_eq!(summary.starting_piece, BoardPiece::Naught);
        assert_eq!(summary.board, "OXO\nXOX\nO..");
        assert_eq!(
            summary.win_line.map(|line| line.kind()),
            Some(tictactoe_board::LineKind::AntiDiagonal)
        );
        assert_eq!(runner.rounds_played(), 1);
        assert_eq!(runner.board().turn(), BoardPiece::Empty);
    }

    #[test]
    fn test_tally_counts_outcomes() {
        let mut runner = Runner::new(RunnerConfig::default().with_seed(5).with_rounds(10)).unwrap();
        let mut seen = 0;
        let tally = runner.run(|_| seen += 1).unwrap();
        assert_eq!(seen, 10);
        assert_eq!(tally.rounds(), 10);
        assert_eq!(runner.rounds_played(), 10);
    }

    #[test]
    fn test_summary_display() {
        let summary = RoundSummary {
            round: 2,
            starting_piece: BoardPiece::Draught,
            winner: BoardPiece::Empty,
            win_line: None,
            moves: 9,
            board: "OXO\nOXX\nXOO".to_string(),
        };
        assert_eq!(
            summary.to_string(),
            "Round 2: draw after 9 moves (Draught started)\nOXO\nOXX\nXOO"
        );
    }
}
