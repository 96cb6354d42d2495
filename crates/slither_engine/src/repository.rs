//! The movement, collision, and consumption engine.
//!
//! One [`EnvironmentRepository`] owns the environment for one level and
//! executes the per-tick state machine: resolve the head's target cell,
//! detect collisions, move the head, propagate the body chain tailward,
//! and resolve food and power-up consumption. All randomness flows
//! through a seeded generator so a given seed replays identically.

// Chain lengths are far below f64 precision limits
#![allow(clippy::cast_precision_loss)]

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info, warn};

use slither_foundation::{Direction, EntityId, EntityKind, Error, LocationId, Result, Rgb};
use slither_world::{Entity, Environment, Food, Grid, Location, PowerUp, PowerUpKind, SnakePart};

use crate::color;
use crate::config::{CollisionPolicy, GameConfig};
use crate::level::grid_size_for;

/// The per-level simulation state and its tick engine.
///
/// Presentation layers consume this through the read accessors; the
/// session layer drives it with [`steer`](Self::steer) and
/// [`move_entity`](Self::move_entity), one step per tick.
#[derive(Clone, Debug)]
pub struct EnvironmentRepository {
    level: u32,
    config: GameConfig,
    environment: Environment,
    /// Snake segments in spawn order: the head first, each grown tail
    /// appended after it.
    chain: Vec<EntityId>,
    /// Collected power-ups whose effects are currently running. These
    /// have left the grid for good.
    active_power_ups: Vec<PowerUp>,
    collision: bool,
    running: bool,
    rng: ChaCha8Rng,
}

impl EnvironmentRepository {
    /// Creates the environment for a level, sized by level number and
    /// difficulty, with a seeded random source.
    #[must_use]
    pub fn new(level: u32, config: GameConfig, seed: u64) -> Self {
        let size = grid_size_for(level, &config);
        info!(
            level,
            size,
            difficulty = ?config.difficulty,
            "initializing environment"
        );
        Self {
            level,
            environment: Environment::new(Grid::new(size, size)),
            chain: Vec::new(),
            active_power_ups: Vec::new(),
            collision: false,
            running: true,
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
        }
    }

    // --- Read model ---

    /// Returns the current level number.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns the number of grid rows.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.environment.rows()
    }

    /// Returns the number of grid columns.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.environment.columns()
    }

    /// Returns the total number of grid cells.
    #[must_use]
    pub fn num_locations(&self) -> usize {
        self.environment.num_locations()
    }

    /// Returns all cells in row-major order, for layout and drawing.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        self.environment.grid().locations()
    }

    /// Returns the cell with the given id.
    ///
    /// # Errors
    ///
    /// Fails if the id does not address the current grid.
    pub fn location_by_id(&self, id: LocationId) -> Result<&Location> {
        self.environment
            .grid()
            .get(id)
            .ok_or_else(|| Error::location_not_found(id))
    }

    /// Returns the environment, for entity lookups while rendering.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Returns true if the snake has collided with itself.
    #[must_use]
    pub fn collision(&self) -> bool {
        self.collision
    }

    /// Returns false once a freeze-policy collision has stopped the
    /// simulation.
    #[must_use]
    pub fn running(&self) -> bool {
        self.running
    }

    /// Returns the number of snake segments.
    #[must_use]
    pub fn snake_length(&self) -> usize {
        self.chain.len()
    }

    /// Returns the snake segments in spawn order, head first.
    #[must_use]
    pub fn snake_parts(&self) -> &[EntityId] {
        &self.chain
    }

    /// Returns true once the chain is long enough to complete the level.
    #[must_use]
    pub fn level_progress_due(&self) -> bool {
        self.chain.len() as f64
            > self.environment.num_locations() as f64 * self.config.level_progress_fraction
    }

    // --- Spatial queries ---

    /// Returns the cell holding an entity, or `None` if unplaced.
    #[must_use]
    pub fn location_of_entity(&self, id: EntityId) -> Option<LocationId> {
        self.environment.location_of(id)
    }

    /// Returns the cell one step from an entity in the given direction,
    /// or `None` at the grid border or for an unplaced entity.
    #[must_use]
    pub fn location_toward(&self, id: EntityId, direction: Direction) -> Option<LocationId> {
        let current = self.environment.location_of(id)?;
        self.environment.grid().neighbor(current, direction)
    }

    /// Returns the cell above an entity.
    #[must_use]
    pub fn location_above(&self, id: EntityId) -> Option<LocationId> {
        self.location_toward(id, Direction::Up)
    }

    /// Returns the cell left of an entity.
    #[must_use]
    pub fn location_left_of(&self, id: EntityId) -> Option<LocationId> {
        self.location_toward(id, Direction::Left)
    }

    /// Returns the cell below an entity.
    #[must_use]
    pub fn location_below(&self, id: EntityId) -> Option<LocationId> {
        self.location_toward(id, Direction::Down)
    }

    /// Returns the cell right of an entity.
    #[must_use]
    pub fn location_right_of(&self, id: EntityId) -> Option<LocationId> {
        self.location_toward(id, Direction::Right)
    }

    /// Returns the snake segment behind a handle.
    ///
    /// # Errors
    ///
    /// Fails if the handle is dead or resolves to a non-segment.
    pub fn snake_part(&self, id: EntityId) -> Result<&SnakePart> {
        match self.environment.entity(id)? {
            Entity::SnakePart(part) => Ok(part),
            other => Err(Error::kind_mismatch(
                id,
                EntityKind::SnakePart,
                other.kind(),
            )),
        }
    }

    fn snake_part_mut(&mut self, id: EntityId) -> Result<&mut SnakePart> {
        match self.environment.entity_mut(id)? {
            Entity::SnakePart(part) => Ok(part),
            other => Err(Error::kind_mismatch(
                id,
                EntityKind::SnakePart,
                other.kind(),
            )),
        }
    }

    /// Walks the chain from any segment to the tail.
    ///
    /// # Errors
    ///
    /// Fails if the walk leaves the chain or loops.
    pub fn tail_of(&self, id: EntityId) -> Result<EntityId> {
        let mut current = id;
        let mut steps = 0usize;
        while let Some(next) = self.snake_part(current)?.next {
            current = next;
            steps += 1;
            if steps > self.chain.len() {
                return Err(Error::broken_chain(current));
            }
        }
        Ok(current)
    }

    // --- Placement ---

    /// Places an entity on a uniformly random cell (empty or not) and
    /// returns its handle.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible for parity with
    /// the other placement operations.
    pub fn add_entity_to_random_location(&mut self, entity: Entity) -> Result<EntityId> {
        let target = self.environment.grid().random_location(&mut self.rng);
        self.add_entity_to_location(entity, target)
    }

    /// Places an entity on the given cell and returns its handle.
    ///
    /// Snake segments placed this way join the chain registry.
    ///
    /// # Errors
    ///
    /// Fails if the cell does not address the current grid.
    pub fn add_entity_to_location(
        &mut self,
        entity: Entity,
        location: LocationId,
    ) -> Result<EntityId> {
        if self.environment.grid().get(location).is_none() {
            return Err(Error::location_not_found(location));
        }
        let is_part = entity.kind() == EntityKind::SnakePart;
        let id = self.environment.insert(entity);
        self.environment.place(id, location)?;
        if is_part {
            self.chain.push(id);
        }
        Ok(id)
    }

    /// Removes an entity from play entirely.
    pub fn remove_entity(&mut self, id: EntityId) {
        self.environment.remove(id);
        self.chain.retain(|&part| part != id);
    }

    // --- Spawning ---

    /// Grows the chain by one segment behind `part` (normally the tail).
    ///
    /// The new segment lands on a random neighbor of `part`, excluding
    /// the cell in `part`'s forward direction so the snake does not
    /// immediately run into its new tail. Returns `None` when no valid
    /// cell turns up within the retry limit; the growth is skipped.
    ///
    /// # Errors
    ///
    /// Fails if `part` is not a placed snake segment.
    pub fn spawn_snake_part(&mut self, part: EntityId, color: Rgb) -> Result<Option<EntityId>> {
        let anchor = self
            .location_of_entity(part)
            .ok_or_else(|| Error::broken_chain(part))?;
        let forward = self
            .environment
            .grid()
            .neighbor(anchor, self.snake_part(part)?.direction);

        let mut target = None;
        for _ in 0..self.config.spawn_retry_limit {
            if let Some(candidate) = self
                .environment
                .grid()
                .random_neighbor(anchor, &mut self.rng)
            {
                if Some(candidate) != forward {
                    target = Some(candidate);
                    break;
                }
            }
        }
        let Some(target) = target else {
            warn!(part = %part, "no cell for a new tail segment; growth skipped");
            return Ok(None);
        };

        let mut segment = SnakePart::new(color);
        segment.prev = Some(part);
        let id = self.environment.insert(Entity::SnakePart(segment));
        self.environment.place(id, target)?;
        self.snake_part_mut(part)?.next = Some(id);
        self.chain.push(id);
        Ok(Some(id))
    }

    /// Spawns a fresh single-segment snake at a uniformly random cell.
    ///
    /// Used when (re)initializing a level. The segment gets a random
    /// green shade and becomes the chain's head.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible for parity with
    /// the other spawn operations.
    pub fn spawn_snake_head(&mut self) -> Result<EntityId> {
        let shade = color::green_shade(&mut self.rng);
        let id = self.add_entity_to_random_location(Entity::SnakePart(SnakePart::new(shade)))?;
        info!("the snake enters the world");
        Ok(id)
    }

    /// Spawns a food item on a uniformly random empty cell.
    ///
    /// Returns `None` when no empty cell turns up within the retry
    /// limit (a nearly full grid); the spawn is skipped.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible for parity with
    /// the other spawn operations.
    pub fn spawn_food(&mut self) -> Result<Option<EntityId>> {
        let Some(target) = self.random_empty_location() else {
            warn!("no empty cell for food; spawn skipped");
            return Ok(None);
        };
        let food = Food::new(color::food_color(&mut self.rng));
        let id = self.environment.insert(Entity::Food(food));
        self.environment.place(id, target)?;
        Ok(Some(id))
    }

    /// Spawns a power-up of a uniformly random kind on a random empty
    /// cell.
    ///
    /// Returns `None` when no empty cell turns up within the retry
    /// limit; the spawn is skipped silently.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; kept fallible for parity with
    /// the other spawn operations.
    pub fn spawn_power_up(&mut self) -> Result<Option<EntityId>> {
        let Some(target) = self.random_empty_location() else {
            warn!("no empty cell for a power-up; spawn skipped");
            return Ok(None);
        };
        let kind = PowerUpKind::ALL[self.rng.gen_range(0..PowerUpKind::ALL.len())];
        let id = self.environment.insert(Entity::PowerUp(PowerUp::new(kind)));
        self.environment.place(id, target)?;
        info!(%kind, "a power-up appears");
        Ok(Some(id))
    }

    fn random_empty_location(&mut self) -> Option<LocationId> {
        for _ in 0..self.config.spawn_retry_limit {
            let candidate = self.environment.grid().random_location(&mut self.rng);
            if self.environment.entities_at(candidate).is_empty() {
                return Some(candidate);
            }
        }
        None
    }

    // --- Steering ---

    /// Points the head in a new direction for the next tick.
    ///
    /// A snake with a body may not reverse into its own neck; such a
    /// change is refused and `false` is returned. A single segment is
    /// free to turn any way.
    ///
    /// # Errors
    ///
    /// Fails if `head` is not a live snake segment.
    pub fn steer(&mut self, head: EntityId, direction: Direction) -> Result<bool> {
        let current = self.snake_part(head)?.direction;
        if self.chain.len() > 1 && direction.is_opposite(current) {
            return Ok(false);
        }
        self.snake_part_mut(head)?.direction = direction;
        Ok(true)
    }

    // --- The tick step ---

    /// Executes one movement step for the chain led by `head`.
    ///
    /// Returns whether a level-progress check is due: either the chain
    /// now exceeds the configured fraction of the grid, or a collision
    /// occurred under the restart policy.
    ///
    /// At the grid border the tick is a no-op: the head stays put, the
    /// chain does not advance, and nothing is consumed.
    ///
    /// # Errors
    ///
    /// Fails if `head` is not a placed snake segment, or if propagation
    /// finds the chain in an inconsistent state.
    pub fn move_entity(
        &mut self,
        head: EntityId,
        direction: Direction,
        now: Instant,
    ) -> Result<bool> {
        let origin = self
            .location_of_entity(head)
            .ok_or_else(|| Error::broken_chain(head))?;
        let Some(target) = self.environment.grid().neighbor(origin, direction) else {
            return Ok(false);
        };

        // Collision is judged on the target cell before the head
        // occupies it.
        let mut restart_signal = false;
        let hit_segment = self.environment.entities_at(target).iter().any(|&id| {
            self.environment
                .entity(id)
                .is_ok_and(|entity| entity.kind() == EntityKind::SnakePart)
        });
        if hit_segment {
            self.collision = true;
            info!("the snake collides with itself and ceases to be");
            match self.config.collision_policy {
                CollisionPolicy::Restart => restart_signal = true,
                CollisionPolicy::Freeze => self.running = false,
            }
        }

        // Move the head, remembering where it stood.
        self.environment.displace(head)?;
        self.environment.place(head, target)?;
        self.snake_part_mut(head)?.last_position = Some(origin);

        // Propagate tailward: each segment steps into the cell its
        // leader just vacated.
        let mut leader = head;
        while let Some(follower) = self.snake_part(leader)?.next {
            let hand_off = self
                .snake_part(leader)?
                .last_position
                .ok_or_else(|| Error::broken_chain(leader))?;
            let Some(follower_origin) = self.location_of_entity(follower) else {
                error!(part = %follower, "a body segment is missing from the grid");
                return Err(Error::broken_chain(follower));
            };
            self.environment.displace(follower)?;
            self.environment.place(follower, hand_off)?;
            self.snake_part_mut(follower)?.last_position = Some(follower_origin);
            leader = follower;
        }

        // Food at the new head cell: eat, respawn elsewhere, grow.
        let food = self.find_at(target, EntityKind::Food);
        if let Some(food_id) = food {
            self.environment.remove(food_id);
            info!("the snake consumes the morsel and grows");
            self.spawn_food()?;
            let tail = self.tail_of(head)?;
            let shade = color::green_shade(&mut self.rng);
            self.spawn_snake_part(tail, shade)?;
            if self.rng.gen::<f64>() < self.config.power_up_spawn_chance {
                self.spawn_power_up()?;
            }
        }

        // Power-up at the new head cell: collect and activate. It
        // leaves the grid for good.
        if let Some(power_up_id) = self.find_at(target, EntityKind::PowerUp) {
            match self.environment.take(power_up_id)? {
                Entity::PowerUp(mut power_up) => {
                    power_up.activate(now);
                    info!(kind = %power_up.kind, "power-up collected");
                    self.active_power_ups.push(power_up);
                }
                other => {
                    return Err(Error::kind_mismatch(
                        power_up_id,
                        EntityKind::PowerUp,
                        other.kind(),
                    ));
                }
            }
        }

        Ok(restart_signal || self.level_progress_due())
    }

    fn find_at(&self, location: LocationId, kind: EntityKind) -> Option<EntityId> {
        self.environment
            .entities_at(location)
            .iter()
            .copied()
            .find(|&id| {
                self.environment
                    .entity(id)
                    .is_ok_and(|entity| entity.kind() == kind)
            })
    }

    // --- Power-up lifecycle ---

    /// Drops every active effect whose duration has elapsed as of `now`.
    pub fn update_power_ups(&mut self, now: Instant) {
        self.active_power_ups.retain_mut(|power_up| {
            if power_up.is_expired_at(now) {
                power_up.deactivate();
                info!(kind = %power_up.kind, "power-up effect expires");
                false
            } else {
                true
            }
        });
    }

    /// Returns the currently active effects, for rendering.
    #[must_use]
    pub fn active_power_ups(&self) -> &[PowerUp] {
        &self.active_power_ups
    }

    // --- Level transitions ---

    /// Removes every entity from the environment and empties the chain
    /// registry, keeping the grid itself.
    pub fn clear(&mut self) {
        self.environment.clear();
        self.chain.clear();
    }

    /// Discards the grid and builds a fresh one sized for `level`.
    ///
    /// A full reset: no entity state survives. The caller re-spawns a
    /// single-segment snake and one food afterwards.
    pub fn reinitialize(&mut self, level: u32) {
        self.level = level;
        let size = grid_size_for(level, &self.config);
        info!(level, size, "reinitializing the environment");
        self.environment = Environment::new(Grid::new(size, size));
        self.chain.clear();
        self.active_power_ups.clear();
        self.collision = false;
        self.running = true;
    }
}
