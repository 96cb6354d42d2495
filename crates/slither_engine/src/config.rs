//! Simulation configuration.

/// Difficulty setting, expressed as a grid-size modifier.
///
/// A larger grid is an easier game: more room before the snake meets
/// itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Difficulty {
    /// Grid scaled up by 1.3 (minimum 5).
    Easy,
    /// Grid size unchanged.
    #[default]
    Normal,
    /// Grid scaled down by 0.7 (minimum 4).
    Hard,
}

/// What happens when the snake runs into itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum CollisionPolicy {
    /// Flag the level for reinitialization after the tick.
    #[default]
    Restart,
    /// Stop the simulation; the collision stays visible until an
    /// explicit restart.
    Freeze,
}

/// Tuning knobs for the simulation core.
///
/// Presentation concerns (display size, tick pacing, audio) belong to the
/// embedding layers and are deliberately absent.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Grid edge length for level 1, before difficulty scaling.
    pub initial_grid_size: u32,
    /// Grid-size difficulty modifier.
    pub difficulty: Difficulty,
    /// Self-collision outcome.
    pub collision_policy: CollisionPolicy,
    /// Fraction of grid cells the chain must exceed to complete a level.
    pub level_progress_fraction: f64,
    /// Chance of a power-up spawning each time food is consumed.
    pub power_up_spawn_chance: f64,
    /// Attempts allowed when searching for a spawn cell before the spawn
    /// is skipped.
    pub spawn_retry_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_grid_size: 5,
            difficulty: Difficulty::Normal,
            collision_policy: CollisionPolicy::Restart,
            level_progress_fraction: 0.25,
            power_up_spawn_chance: 0.15,
            spawn_retry_limit: 64,
        }
    }
}

impl GameConfig {
    /// Builder method to set the initial grid size.
    #[must_use]
    pub fn with_initial_grid_size(mut self, size: u32) -> Self {
        self.initial_grid_size = size;
        self
    }

    /// Builder method to set the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Builder method to set the collision policy.
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Builder method to set the level progress fraction.
    #[must_use]
    pub fn with_level_progress_fraction(mut self, fraction: f64) -> Self {
        self.level_progress_fraction = fraction;
        self
    }

    /// Builder method to set the power-up spawn chance.
    #[must_use]
    pub fn with_power_up_spawn_chance(mut self, chance: f64) -> Self {
        self.power_up_spawn_chance = chance;
        self
    }

    /// Builder method to set the spawn retry limit.
    #[must_use]
    pub fn with_spawn_retry_limit(mut self, limit: u32) -> Self {
        self.spawn_retry_limit = limit;
        self
    }
}
