//! Strictly Grid - N×N tic-tac-toe game logic
//!
//! Two local players take turns placing X and O on a square board of side
//! 2 to 9. A player wins by filling an entire row, column, or long
//! diagonal; a full board with no such line is a draw. Scores accumulate
//! across the rounds of a session.
//!
//! # Architecture
//!
//! - **Types**: marks, cells, coordinates, board size and the board itself
//! - **Rules**: pure win and draw detection over a board
//! - **Invariants / Contracts**: move legality and post-move checks
//! - **Engine**: round lifecycle, scoreboard and configuration
//!
//! Rendering and input handling belong to the caller, which forwards moves
//! and reads back [`EngineSnapshot`]s.
//!
//! # Example
//!
//! ```
//! use strictly_grid::{EngineConfig, GameEngine, Mark, MoveOutcome};
//!
//! # fn example() -> Result<(), strictly_grid::EngineError> {
//! let mut engine = GameEngine::new(EngineConfig::default());
//! engine.start_session();
//!
//! for (row, col) in [(0, 0), (0, 1), (1, 1), (0, 2)] {
//!     engine.apply_move(row, col)?;
//! }
//! let outcome = engine.apply_move(2, 2)?;
//! assert!(matches!(outcome, MoveOutcome::Win { player: Mark::X, .. }));
//! assert_eq!(engine.scores().wins(Mark::X), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod contracts;
mod engine;
mod error;
mod invariants;
mod round;
mod score;
mod types;

pub mod rules;

// Crate-level exports - Engine
pub use engine::{EngineSnapshot, GameEngine};

// Crate-level exports - Configuration and errors
pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, EngineErrorKind};

// Crate-level exports - Round state
pub use round::{MoveOutcome, Rejection, RoundState};
pub use score::Scoreboard;

// Crate-level exports - Domain types
pub use rules::{Line, WinningLine};
pub use types::{Board, BoardSize, Cell, Coord, Direction, Mark};

// Crate-level exports - Contracts and invariants
pub use contracts::{CellIsEmpty, Contract, InBounds, LegalMove, MoveContract, RoundIsActive};
pub use invariants::{
    BalancedMarksInvariant, Invariant, InvariantSet, InvariantViolation, MoveCountInvariant,
    RoundInvariants, TurnOrderInvariant,
};
