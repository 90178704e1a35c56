//! Round results and the bounded, score-ordered leaderboard.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of entries a leaderboard retains.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Rejected result submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// The player name was empty or whitespace only.
    #[display("Please enter a name")]
    BlankName,
}

/// Immutable record of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct RoundResult {
    name: String,
    score: u32,
}

impl RoundResult {
    /// Creates a result, trimming the player name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankName`] if the trimmed name is empty.
    #[instrument(skip(name))]
    pub fn new(name: impl AsRef<str>, score: u32) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            debug!("Rejected blank player name");
            return Err(ValidationError::BlankName);
        }
        Ok(Self {
            name: name.to_string(),
            score,
        })
    }
}

/// Top results by descending score; ties keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<RoundResult>,
    capacity: usize,
}

impl Leaderboard {
    /// Creates an empty leaderboard holding [`LEADERBOARD_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(LEADERBOARD_CAPACITY)
    }

    /// Creates an empty leaderboard holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Builds a leaderboard by recording `results` in order.
    pub fn from_results(results: impl IntoIterator<Item = RoundResult>) -> Self {
        let mut board = Self::new();
        for result in results {
            board.record(result);
        }
        board
    }

    /// Records a result and trims the board.
    ///
    /// Returns the zero-based rank of the new entry, or `None` if it did not
    /// make the cut. A new entry ranks below every existing entry with the
    /// same score.
    #[instrument(skip(self), fields(len = self.entries.len()))]
    pub fn record(&mut self, result: RoundResult) -> Option<usize> {
        let rank = self.entries.partition_point(|entry| entry.score >= result.score);
        if rank >= self.capacity {
            debug!(rank, "Result below leaderboard cut");
            return None;
        }
        self.entries.insert(rank, result);
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    /// Entries, best first.
    pub fn entries(&self) -> &[RoundResult] {
        &self.entries
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest retained score.
    pub fn best_score(&self) -> Option<u32> {
        self.entries.first().map(|entry| entry.score)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}
