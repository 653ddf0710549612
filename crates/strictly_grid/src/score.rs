//! Cumulative scores across the rounds of a session.

use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Wins per mark within one session.
///
/// Only ever incremented, one per round won; reset only by starting a new
/// session or returning to configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    x: u32,
    o: u32,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds won by `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Credits `mark` with one round won.
    #[instrument(skip(self))]
    pub(crate) fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x = self.x.saturating_add(1),
            Mark::O => self.o = self.o.saturating_add(1),
        }
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X: {}  O: {}", self.x, self.o)
    }
}
