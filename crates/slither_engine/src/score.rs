//! Score bookkeeping.

// Truncating percent math mirrors the scoring rules
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use tracing::info;

/// Current and cumulative points.
///
/// The score is a pure function of chain length and grid occupancy:
/// `current = length x (integer percent of cells occupied)`. Cumulative
/// points only grow when a level is completed.
#[derive(Clone, Debug, Default)]
pub struct GameScore {
    /// Points earned in the current level.
    pub current_points: u64,
    /// Points banked from completed levels.
    pub cumulative_points: u64,
}

impl GameScore {
    /// Creates a zeroed score.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the current points from chain length and cell count,
    /// returning the new value.
    pub fn calculate(&mut self, length: usize, num_locations: usize) -> u64 {
        let percentage = (length as f64 / num_locations as f64 * 100.0) as u64;
        self.current_points = length as u64 * percentage;
        self.current_points
    }

    /// Zeroes the current level's points.
    pub fn reset(&mut self) {
        self.current_points = 0;
    }

    /// Banks the current points into the cumulative total on level
    /// completion.
    pub fn level_complete(&mut self) {
        self.cumulative_points += self.current_points;
        self.current_points = 0;
    }

    /// Logs the end-of-level summary.
    pub fn log_stats(&self, length: usize, num_locations: usize) {
        let percentage = (length as f64 / num_locations as f64 * 100.0) as u64;
        info!(length, percentage, "the snake's final stretch");
        info!(level_score = self.current_points, "level score");
        info!(total_score = self.cumulative_points, "total score");
    }
}
