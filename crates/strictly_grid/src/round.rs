//! Round state and move outcomes.

use crate::contracts::{Contract, MoveContract};
use crate::error::EngineError;
use crate::rules::{WinningLine, winning_line_through};
use crate::types::{Board, BoardSize, Cell, Coord, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Rejection {
    /// The round already ended in a win or draw.
    #[display("the round is over")]
    RoundOver,
    /// The coordinate is off the board.
    #[display("{} is off the board", _0)]
    OutOfBounds(Coord),
    /// The cell already holds a mark.
    #[display("{} is already occupied", _0)]
    Occupied(Coord),
}

/// Result of submitting a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum MoveOutcome {
    /// Move ignored; nothing changed.
    #[display("Move ignored: {}", _0)]
    Rejected(Rejection),
    /// The mover completed a line and the round is over.
    #[display("Player {} Wins!", player)]
    Win {
        /// The winning mark.
        player: Mark,
        /// The completed line.
        line: WinningLine,
    },
    /// The board filled up without a winner.
    #[display("It's a Draw!")]
    Draw,
    /// The round continues.
    #[display("Turn: Player {}", next)]
    Continue {
        /// The mark to move next.
        next: Mark,
    },
}

impl MoveOutcome {
    /// True if the move was accepted.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    /// True if the move ended the round.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MoveOutcome::Win { .. } | MoveOutcome::Draw)
    }
}

/// State of a single round.
///
/// `active` is true from round start until a win or draw, and stays false
/// until a new round replaces this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundState {
    pub(crate) board: Board,
    pub(crate) current_player: Mark,
    pub(crate) moves_played: usize,
    pub(crate) active: bool,
}

impl RoundState {
    /// Creates a fresh round: empty board, X to move.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self {
            board: Board::new(size),
            current_player: Mark::X,
            moves_played: 0,
            active: true,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move (or the final mover once terminal).
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Number of accepted moves.
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// True until a win or draw is detected.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Places the current player's mark at `coord`.
    ///
    /// Illegal moves return [`MoveOutcome::Rejected`] and leave the round
    /// unchanged. Terminal detection runs synchronously: win first, then
    /// draw, otherwise the turn passes.
    ///
    /// # Errors
    ///
    /// Only fails in debug builds, when a postcondition does not hold.
    #[instrument(skip(self), fields(player = ?self.current_player, moves = self.moves_played))]
    pub(crate) fn play(&mut self, coord: Coord) -> Result<MoveOutcome, EngineError> {
        if let Err(rejection) = MoveContract::pre(self, &coord) {
            debug!(%rejection, "Move rejected");
            return Ok(MoveOutcome::Rejected(rejection));
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.current_player;
        self.board.set(coord, Cell::Occupied(player));
        self.moves_played += 1;

        let outcome = if let Some(line) = winning_line_through(&self.board, player, coord) {
            self.active = false;
            info!(%player, line = ?line.line(), "Round won");
            MoveOutcome::Win { player, line }
        } else if self.moves_played == self.board.size().cell_count() {
            self.active = false;
            info!("Round drawn");
            MoveOutcome::Draw
        } else {
            self.current_player = player.opponent();
            debug!(next = %self.current_player, "Move accepted");
            MoveOutcome::Continue {
                next: self.current_player,
            }
        };

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Line;

    fn play_all(round: &mut RoundState, moves: &[(usize, usize)]) -> Vec<MoveOutcome> {
        moves
            .iter()
            .map(|&(r, c)| round.play(Coord::new(r, c)).unwrap())
            .collect()
    }

    #[test]
    fn test_fresh_round() {
        let round = RoundState::new(BoardSize::try_new(4).unwrap());
        assert!(round.is_active());
        assert_eq!(round.current_player(), Mark::X);
        assert_eq!(round.moves_played(), 0);
        assert_eq!(round.board().occupied_count(), 0);
    }

    #[test]
    fn test_continue_alternates() {
        let mut round = RoundState::new(BoardSize::default());
        let outcomes = play_all(&mut round, &[(0, 0), (1, 1)]);
        assert_eq!(
            outcomes,
            vec![
                MoveOutcome::Continue { next: Mark::O },
                MoveOutcome::Continue { next: Mark::X }
            ]
        );
    }

    #[test]
    fn test_rejection_leaves_round_unchanged() {
        let mut round = RoundState::new(BoardSize::default());
        round.play(Coord::new(0, 0)).unwrap();
        let snapshot = round.clone();

        let outcome = round.play(Coord::new(0, 0)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Rejected(Rejection::Occupied(Coord::new(0, 0)))
        );
        assert_eq!(round, snapshot);
    }

    #[test]
    fn test_win_stops_round() {
        let mut round = RoundState::new(BoardSize::try_new(2).unwrap());
        let outcomes = play_all(&mut round, &[(0, 0), (1, 1), (0, 1)]);
        match outcomes.last().unwrap() {
            MoveOutcome::Win { player, line } => {
                assert_eq!(*player, Mark::X);
                assert_eq!(*line.line(), Line::Row(0));
            }
            other => panic!("Expected win, got {:?}", other),
        }
        assert!(!round.is_active());
        assert_eq!(
            round.play(Coord::new(1, 0)).unwrap(),
            MoveOutcome::Rejected(Rejection::RoundOver)
        );
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(MoveOutcome::Draw.to_string(), "It's a Draw!");
        assert_eq!(
            MoveOutcome::Continue { next: Mark::O }.to_string(),
            "Turn: Player O"
        );
        assert_eq!(
            MoveOutcome::Rejected(Rejection::OutOfBounds(Coord::new(5, 0))).to_string(),
            "Move ignored: (5, 0) is off the board"
        );
    }
}
