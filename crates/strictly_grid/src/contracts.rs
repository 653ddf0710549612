//! Contract-based validation for moves.
//!
//! Preconditions decide whether a move is legal; an illegal move becomes a
//! [`Rejection`] and the round is left untouched. Postconditions verify the
//! round invariants after a transition and are only run in debug builds.

use crate::RoundState;
use crate::error::{EngineError, EngineErrorKind};
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::round::Rejection;
use crate::types::{Cell, Coord};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Rejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), EngineError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the round has not reached a terminal state.
pub struct RoundIsActive;

impl RoundIsActive {
    /// Rejects moves once the round is won or drawn.
    pub fn check(round: &RoundState) -> Result<(), Rejection> {
        if round.is_active() {
            Ok(())
        } else {
            Err(Rejection::RoundOver)
        }
    }
}

/// Precondition: the coordinate lies on the board.
pub struct InBounds;

impl InBounds {
    /// Rejects coordinates past the last row or column.
    pub fn check(coord: &Coord, round: &RoundState) -> Result<(), Rejection> {
        if coord.is_within(round.board().size()) {
            Ok(())
        } else {
            Err(Rejection::OutOfBounds(*coord))
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects moves onto an occupied cell.
    pub fn check(coord: &Coord, round: &RoundState) -> Result<(), Rejection> {
        if round.board().is_empty(*coord) {
            Ok(())
        } else {
            Err(Rejection::Occupied(*coord))
        }
    }
}

/// Composite precondition, checked in order: active round, on the board,
/// empty cell.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(round))]
    pub fn check(coord: &Coord, round: &RoundState) -> Result<(), Rejection> {
        RoundIsActive::check(round)?;
        InBounds::check(coord, round)?;
        CellIsEmpty::check(coord, round)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placing a mark.
///
/// Postconditions:
/// - Exactly one cell went from empty to occupied; no other cell changed
/// - Round invariants still hold
pub struct MoveContract;

impl MoveContract {
    fn one_cell_filled(before: &RoundState, after: &RoundState) -> bool {
        let changed: Vec<_> = before
            .board()
            .cells()
            .iter()
            .zip(after.board().cells())
            .filter(|(b, a)| b != a)
            .collect();
        matches!(changed.as_slice(), [(Cell::Empty, Cell::Occupied(_))])
    }
}

impl Contract<RoundState, Coord> for MoveContract {
    fn pre(round: &RoundState, coord: &Coord) -> Result<(), Rejection> {
        LegalMove::check(coord, round)
    }

    fn post(before: &RoundState, after: &RoundState) -> Result<(), EngineError> {
        let mut descriptions = Vec::new();
        if !Self::one_cell_filled(before, after) {
            descriptions.push("Exactly one empty cell is filled per move".to_string());
        }
        if let Err(violations) = RoundInvariants::check_all(after) {
            descriptions.extend(violations.into_iter().map(|v| v.description));
        }

        if descriptions.is_empty() {
            Ok(())
        } else {
            let joined = descriptions.join("; ");
            warn!(violations = %joined, "Move postcondition failed");
            Err(EngineError::new(EngineErrorKind::InvariantViolation(format!(
                "Postcondition failed: {}",
                joined
            ))))
        }
    }
}
