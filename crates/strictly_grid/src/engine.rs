//! The game engine: configuration, round lifecycle and scores.
//!
//! A [`GameEngine`] owns everything a session needs. There is no global
//! state, so independent engines can coexist (one per test, one per
//! connected client, and so on). All operations are synchronous and run to
//! completion; a multi-client host should wrap each engine in its own mutex
//! and feed moves in arrival order.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineErrorKind};
use crate::round::{MoveOutcome, RoundState};
use crate::score::Scoreboard;
use crate::types::{BoardSize, Coord};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Read-only view handed to the presentation layer after each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct EngineSnapshot {
    /// Configured board size.
    board_size: BoardSize,
    /// Current round, absent before the first round or after going back
    /// to configuration.
    round: Option<RoundState>,
    /// Scores for the current session.
    scores: Scoreboard,
}

/// N×N tic-tac-toe engine for two local players.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    config: EngineConfig,
    round: Option<RoundState>,
    scores: Scoreboard,
}

impl GameEngine {
    /// Creates an engine in the configuration phase.
    #[instrument]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            round: None,
            scores: Scoreboard::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sets the board size for subsequent rounds.
    ///
    /// A round already in progress keeps its board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineErrorKind::InvalidBoardSize`] if `size` is outside
    /// [2, 9]. Callers holding unchecked input should use
    /// [`BoardSize::clamped`] first.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn configure(&mut self, size: usize) -> Result<BoardSize, EngineError> {
        let size = BoardSize::try_new(size)?;
        self.config.board_size = size;
        debug!(%size, "Board size configured");
        Ok(size)
    }

    /// Resets the scores and starts the first round of a new session.
    #[instrument(skip(self))]
    pub fn start_session(&mut self) -> &RoundState {
        info!(size = %self.config.board_size, "Starting session");
        self.scores = Scoreboard::new();
        self.start_round()
    }

    /// Replaces the current round with a fresh one. Scores are kept.
    #[instrument(skip(self))]
    pub fn start_round(&mut self) -> &RoundState {
        info!(size = %self.config.board_size, "Starting round");
        self.round.insert(RoundState::new(self.config.board_size))
    }

    /// Submits a move for the current player at 0-indexed (`row`, `col`).
    ///
    /// Moves on an inactive round, an occupied cell, or off the board are
    /// ignored and reported as [`MoveOutcome::Rejected`]. A winning move
    /// credits the winner on the scoreboard.
    ///
    /// # Errors
    ///
    /// Returns [`EngineErrorKind::RoundNotStarted`] if no round exists.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<MoveOutcome, EngineError> {
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| EngineError::new(EngineErrorKind::RoundNotStarted))?;

        let outcome = round.play(Coord::new(row, col))?;
        if let MoveOutcome::Win { player, .. } = &outcome {
            self.scores.record_win(*player);
            info!(scores = %self.scores, "Scoreboard updated");
        }
        Ok(outcome)
    }

    /// Ends the session and returns to configuration.
    ///
    /// Discards the round and scores and restores the default board size,
    /// so nothing from the old session remains visible.
    #[instrument(skip(self))]
    pub fn back_to_configuration(&mut self) {
        info!("Returning to configuration");
        self.round = None;
        self.scores = Scoreboard::new();
        self.config = EngineConfig::default();
    }

    /// Returns the current round, if one has been started.
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// True while a round is in progress and accepting moves.
    pub fn is_round_active(&self) -> bool {
        self.round.as_ref().is_some_and(RoundState::is_active)
    }

    /// Returns the session scores.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Captures the full engine state for rendering.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            board_size: self.config.board_size,
            round: self.round.clone(),
            scores: self.scores,
        }
    }
}
