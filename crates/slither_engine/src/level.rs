//! Grid sizing across levels.

// Truncating float-to-int is the intended rounding here
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::config::{Difficulty, GameConfig};

/// Returns the grid edge length for a level under the given config.
///
/// Level 1 uses the configured base size; later levels grow by one cell
/// per level. The difficulty modifier is applied on top, on every level
/// (initial construction and reinitialization alike).
#[must_use]
pub fn grid_size_for(level: u32, config: &GameConfig) -> u32 {
    let base = if level == 1 {
        config.initial_grid_size
    } else {
        config.initial_grid_size + level
    };

    match config.difficulty {
        Difficulty::Easy => (f64::from(base) * 1.3) as u32,
        Difficulty::Normal => base,
        Difficulty::Hard => (f64::from(base) * 0.7) as u32,
    }
    .max(match config.difficulty {
        Difficulty::Easy => 5,
        Difficulty::Normal => 1,
        Difficulty::Hard => 4,
    })
}
