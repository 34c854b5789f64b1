//! Longest-run leaderboard
//!
//! Each reset ends a run; the stopwatch value at that moment is offered
//! here. Keeps the top 10 survival times.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_RUN_RECORDS: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEntry {
    /// Survival time shown on the stopwatch
    pub elapsed_secs: f64,
    /// Simulation tick the run ended on
    pub ended_at_tick: u64,
}

/// Survival-time leaderboard, sorted longest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunRecords {
    pub entries: Vec<RunEntry>,
}

impl RunRecords {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, elapsed_secs: f64) -> bool {
        if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_RUN_RECORDS {
            return true;
        }
        self.entries
            .last()
            .map(|e| elapsed_secs > e.elapsed_secs)
            .unwrap_or(true)
    }

    /// Rank a run would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, elapsed_secs: f64) -> Option<usize> {
        if !self.qualifies(elapsed_secs) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| elapsed_secs > e.elapsed_secs);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run; returns the rank achieved (1-indexed)
    pub fn add_run(&mut self, elapsed_secs: f64, ended_at_tick: u64) -> Option<usize> {
        let rank = self.potential_rank(elapsed_secs)?;
        self.entries.insert(
            rank - 1,
            RunEntry {
                elapsed_secs,
                ended_at_tick,
            },
        );
        self.entries.truncate(MAX_RUN_RECORDS);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest run so far
    pub fn best(&self) -> Option<f64> {
        self.entries.first().map(|e| e.elapsed_secs)
    }
}
