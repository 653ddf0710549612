//! Engine error types.
//!
//! Only collaborator bugs are errors. Ordinary bad input (an occupied
//! cell, an off-board coordinate, a move after the round ended) is reported
//! through [`MoveOutcome::Rejected`](crate::MoveOutcome::Rejected) instead.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// Board size outside the supported range.
    #[display("Board size {} is outside [2, 9]", _0)]
    InvalidBoardSize(usize),

    /// A move was submitted before any round was started.
    #[display("No round has been started")]
    RoundNotStarted,

    /// A round invariant failed after a state transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// Error kind.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &EngineErrorKind {
        &self.kind
    }
}

impl From<EngineErrorKind> for EngineError {
    #[track_caller]
    fn from(kind: EngineErrorKind) -> Self {
        Self::new(kind)
    }
}
