//! Tick-driven game orchestration.

// Chain lengths are far below f64 precision limits
#![allow(clippy::cast_precision_loss)]

use std::time::Instant;

use tracing::info;

use slither_engine::{EnvironmentRepository, GameConfig, GameScore};
use slither_foundation::{Direction, EntityId, Result};

use crate::state::{NullStateStore, SavedState, StateStore};

/// One play-through: the repository for the current level plus the state
/// that outlives levels (score, level number, persistence).
///
/// The session is UI-agnostic. Input layers call [`steer`](Self::steer)
/// (at most one accepted change per tick) and a clock calls
/// [`advance`](Self::advance) once per tick; rendering layers read
/// through [`repository`](Self::repository) and the score accessors.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    repository: EnvironmentRepository,
    score: GameScore,
    state_store: Box<dyn StateStore>,
    head: EntityId,
    level: u32,
    tick: u64,
    changed_direction_this_tick: bool,
}

impl GameSession {
    /// Starts a session with no persistence.
    ///
    /// # Errors
    ///
    /// Fails only if initial entity placement fails, which indicates a
    /// configuration bug (zero-size grid).
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_state_store(config, seed, Box::new(NullStateStore))
    }

    /// Starts a session, resuming level and score from the given store.
    ///
    /// # Errors
    ///
    /// Fails only if initial entity placement fails.
    pub fn with_state_store(
        config: GameConfig,
        seed: u64,
        state_store: Box<dyn StateStore>,
    ) -> Result<Self> {
        let saved = state_store.load();
        let mut repository = EnvironmentRepository::new(saved.level, config.clone(), seed);
        let head = repository.spawn_snake_head()?;
        repository.spawn_food()?;

        let mut score = GameScore::new();
        score.current_points = saved.current_score;
        score.cumulative_points = saved.cumulative_score;

        Ok(Self {
            config,
            repository,
            score,
            state_store,
            head,
            level: saved.level,
            tick: 0,
            changed_direction_this_tick: false,
        })
    }

    /// Requests a direction change for the next tick.
    ///
    /// At most one change is accepted per tick; later requests in the
    /// same tick are ignored. Reversals into the snake's own neck are
    /// refused by the engine. Returns whether the change took effect.
    ///
    /// # Errors
    ///
    /// Fails if the head handle has gone stale, which indicates a bug.
    pub fn steer(&mut self, direction: Direction) -> Result<bool> {
        if self.changed_direction_this_tick {
            return Ok(false);
        }
        let changed = self.repository.steer(self.head, direction)?;
        if changed {
            self.changed_direction_this_tick = true;
        }
        Ok(changed)
    }

    /// Advances the simulation by one tick.
    ///
    /// Moves the chain in the head's current direction, purges expired
    /// power-up effects, runs the level transition when one is due, and
    /// recalculates the score. Does nothing once a freeze-policy
    /// collision has stopped the simulation.
    ///
    /// # Errors
    ///
    /// Surfaces engine failures (broken chain invariants).
    pub fn advance(&mut self, now: Instant) -> Result<()> {
        if !self.repository.running() {
            return Ok(());
        }

        let direction = self.repository.snake_part(self.head)?.direction;
        let progress_due = self.repository.move_entity(self.head, direction, now)?;
        self.repository.update_power_ups(now);

        if progress_due && self.repository.running() {
            self.check_for_level_progress_and_reinitialize()?;
        }

        self.score
            .calculate(self.repository.snake_length(), self.repository.num_locations());
        self.tick += 1;
        self.changed_direction_this_tick = false;
        Ok(())
    }

    /// Restarts play explicitly: the current level's points are
    /// forfeited and the level is rebuilt.
    ///
    /// This is also how a frozen session (freeze collision policy)
    /// resumes.
    ///
    /// # Errors
    ///
    /// Fails only if respawning the snake or food fails.
    pub fn restart(&mut self) -> Result<()> {
        info!("restarting the game");
        self.score.reset();
        self.check_for_level_progress_and_reinitialize()
    }

    fn check_for_level_progress_and_reinitialize(&mut self) -> Result<()> {
        info!("checking for level progress");
        if self.repository.level_progress_due() {
            info!("the snake has progressed to the next level");
            self.score
                .log_stats(self.repository.snake_length(), self.repository.num_locations());
            self.score.level_complete();
            self.level += 1;
        } else {
            self.score.reset();
        }

        self.save_state();

        self.repository.reinitialize(self.level);
        self.head = self.repository.spawn_snake_head()?;
        self.repository.spawn_food()?;
        self.tick = 0;
        self.changed_direction_this_tick = false;
        Ok(())
    }

    fn save_state(&mut self) {
        let state = SavedState {
            level: self.level,
            current_score: self.score.current_points,
            cumulative_score: self.score.cumulative_points,
        };
        self.state_store.save(&state);
    }

    // --- Read model ---

    /// Returns the current level number.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns the number of ticks advanced in the current level.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns the head's handle.
    #[must_use]
    pub fn head(&self) -> EntityId {
        self.head
    }

    /// Returns the chain length.
    #[must_use]
    pub fn snake_length(&self) -> usize {
        self.repository.snake_length()
    }

    /// Returns the points earned in the current level.
    #[must_use]
    pub fn current_score(&self) -> u64 {
        self.score.current_points
    }

    /// Returns the points banked from completed levels.
    #[must_use]
    pub fn cumulative_score(&self) -> u64 {
        self.score.cumulative_points
    }

    /// Returns true if the snake has collided with itself this level.
    #[must_use]
    pub fn collision(&self) -> bool {
        self.repository.collision()
    }

    /// Returns false once a freeze-policy collision has stopped play.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.repository.running()
    }

    /// Returns the fraction of grid cells the chain occupies.
    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        self.repository.snake_length() as f64 / self.repository.num_locations() as f64
    }

    /// Returns the configuration this session runs under.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the repository, for rendering and spatial queries.
    #[must_use]
    pub fn repository(&self) -> &EnvironmentRepository {
        &self.repository
    }
}
