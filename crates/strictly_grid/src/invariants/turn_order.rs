//! Turn order invariant: the player to move follows from the move count.

use super::Invariant;
use crate::RoundState;
use crate::types::Mark;

/// Invariant: while the round is active, X is to move exactly when an
/// even number of moves has been played.
///
/// Terminal rounds are exempt: the final mover stays current.
pub struct TurnOrderInvariant;

impl Invariant<RoundState> for TurnOrderInvariant {
    fn holds(round: &RoundState) -> bool {
        if !round.is_active() {
            return true;
        }
        let expected = if round.moves_played() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        };
        round.current_player() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
