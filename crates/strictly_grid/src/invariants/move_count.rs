//! Move count invariant: the counter matches the occupied cells.

use super::Invariant;
use crate::RoundState;

/// Invariant: `moves_played` equals the number of non-empty cells.
///
/// Draw detection relies on the counter instead of rescanning the board.
pub struct MoveCountInvariant;

impl Invariant<RoundState> for MoveCountInvariant {
    fn holds(round: &RoundState) -> bool {
        round.moves_played() == round.board().occupied_count()
    }

    fn description() -> &'static str {
        "Move count matches number of occupied cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoardSize, Cell, Coord, Mark};

    #[test]
    fn test_fresh_round_holds() {
        let round = RoundState::new(BoardSize::default());
        assert!(MoveCountInvariant::holds(&round));
    }

    #[test]
    fn test_holds_after_moves() {
        let mut round = RoundState::new(BoardSize::try_new(4).unwrap());
        for (r, c) in [(0, 0), (3, 3), (2, 1), (1, 2)] {
            round.play(Coord::new(r, c)).unwrap();
        }
        assert_eq!(round.moves_played(), 4);
        assert!(MoveCountInvariant::holds(&round));
    }

    #[test]
    fn test_uncounted_mark_violates() {
        let mut round = RoundState::new(BoardSize::default());
        round.board.set(Coord::new(2, 2), Cell::Occupied(Mark::X));
        assert!(!MoveCountInvariant::holds(&round));
    }
}
