//! Balanced marks invariant: X leads O by at most one.

use super::Invariant;
use crate::RoundState;
use crate::types::Mark;

/// Invariant: the board holds as many X as O, or exactly one more X.
///
/// Follows from X moving first and strict alternation.
pub struct BalancedMarksInvariant;

impl Invariant<RoundState> for BalancedMarksInvariant {
    fn holds(round: &RoundState) -> bool {
        let x = round.board().count(Mark::X);
        let o = round.board().count(Mark::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}
