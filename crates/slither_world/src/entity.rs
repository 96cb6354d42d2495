//! The entity family: snake parts, food, and power-ups.
//!
//! Entities never know their own location; placement is tracked solely by
//! the [`Environment`](crate::Environment). Snake chain links are arena
//! handles, not references, so the chain carries no ownership cycles.

use std::fmt;
use std::time::{Duration, Instant};

use slither_foundation::{Direction, EntityId, EntityKind, LocationId, Rgb};

/// One entity occupying (at most) one grid cell.
///
/// A closed sum type: every cell scan matches exhaustively over these
/// three variants.
#[derive(Clone, Debug)]
pub enum Entity {
    /// One segment of the snake chain.
    SnakePart(SnakePart),
    /// A consumable food item.
    Food(Food),
    /// A collectible timed power-up.
    PowerUp(PowerUp),
}

impl Entity {
    /// Returns the kind tag of this entity.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::SnakePart(_) => EntityKind::SnakePart,
            Entity::Food(_) => EntityKind::Food,
            Entity::PowerUp(_) => EntityKind::PowerUp,
        }
    }

    /// Returns the display color of this entity.
    #[must_use]
    pub fn color(&self) -> Rgb {
        match self {
            Entity::SnakePart(part) => part.color,
            Entity::Food(food) => food.color,
            Entity::PowerUp(power_up) => power_up.color,
        }
    }

    /// Returns the snake part, if this entity is one.
    #[must_use]
    pub fn as_snake_part(&self) -> Option<&SnakePart> {
        match self {
            Entity::SnakePart(part) => Some(part),
            _ => None,
        }
    }

    /// Returns the snake part mutably, if this entity is one.
    pub fn as_snake_part_mut(&mut self) -> Option<&mut SnakePart> {
        match self {
            Entity::SnakePart(part) => Some(part),
            _ => None,
        }
    }

    /// Returns the food item, if this entity is one.
    #[must_use]
    pub fn as_food(&self) -> Option<&Food> {
        match self {
            Entity::Food(food) => Some(food),
            _ => None,
        }
    }

    /// Returns the power-up, if this entity is one.
    #[must_use]
    pub fn as_power_up(&self) -> Option<&PowerUp> {
        match self {
            Entity::PowerUp(power_up) => Some(power_up),
            _ => None,
        }
    }
}

/// One segment of the snake chain.
///
/// The chain is a head-to-tail sequence: `next` points toward the tail and
/// drives movement propagation; `prev` points back toward the head and is
/// used for traversal only. `last_position` records the cell this segment
/// occupied immediately before its most recent move, which is exactly
/// where the segment behind it moves next.
#[derive(Clone, Debug)]
pub struct SnakePart {
    /// Display color (a shade of green).
    pub color: Rgb,
    /// The direction this part is facing.
    pub direction: Direction,
    /// The segment behind this one (toward the tail).
    pub next: Option<EntityId>,
    /// The segment in front of this one (toward the head).
    pub prev: Option<EntityId>,
    /// The cell occupied immediately before the most recent move.
    pub last_position: Option<LocationId>,
}

impl SnakePart {
    /// Creates a new unlinked segment facing up.
    #[must_use]
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            direction: Direction::Up,
            next: None,
            prev: None,
            last_position: None,
        }
    }

    /// Returns true if a segment follows this one toward the tail.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A consumable food item.
///
/// Eaten food is destroyed and a replacement spawns elsewhere, so exactly
/// one food is present per environment in the steady state.
#[derive(Clone, Debug)]
pub struct Food {
    /// Display color.
    pub color: Rgb,
}

impl Food {
    /// Creates a food item with the given color.
    #[must_use]
    pub fn new(color: Rgb) -> Self {
        Self { color }
    }
}

/// The closed set of power-up effects.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PowerUpKind {
    /// Temporarily speeds the snake up.
    SpeedBoost,
    /// Temporarily slows the tick clock down.
    SlowTime,
    /// Temporarily ignores self-collisions.
    Invincibility,
    /// Temporarily multiplies earned points.
    ScoreMultiplier,
}

impl PowerUpKind {
    /// All kinds, for uniform random selection.
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowTime,
        PowerUpKind::Invincibility,
        PowerUpKind::ScoreMultiplier,
    ];

    /// Fixed display color for this kind.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            PowerUpKind::SpeedBoost => Rgb::new(255, 215, 0),
            PowerUpKind::SlowTime => Rgb::new(0, 191, 255),
            PowerUpKind::Invincibility => Rgb::new(255, 255, 255),
            PowerUpKind::ScoreMultiplier => Rgb::new(255, 0, 255),
        }
    }

    /// Fixed effect duration for this kind.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            PowerUpKind::SpeedBoost => Duration::from_secs(5),
            PowerUpKind::SlowTime => Duration::from_secs(8),
            PowerUpKind::Invincibility => Duration::from_secs(6),
            PowerUpKind::ScoreMultiplier => Duration::from_secs(10),
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PowerUpKind::SpeedBoost => "Speed Boost",
            PowerUpKind::SlowTime => "Slow Time",
            PowerUpKind::Invincibility => "Invincibility",
            PowerUpKind::ScoreMultiplier => "Score Multiplier",
        };
        write!(f, "{name}")
    }
}

/// A collectible timed power-up.
///
/// Lifecycle: spawned inactive on the grid, collected (leaves the grid,
/// activates), expires once the elapsed time reaches its duration. A
/// collected power-up never re-enters the grid.
#[derive(Clone, Debug)]
pub struct PowerUp {
    /// Which effect this power-up grants.
    pub kind: PowerUpKind,
    /// Display color, fixed per kind.
    pub color: Rgb,
    /// How long the effect lasts once activated.
    pub duration: Duration,
    active: bool,
    activated_at: Option<Instant>,
}

impl PowerUp {
    /// Creates an inactive power-up of the given kind, with the kind's
    /// fixed color and duration.
    #[must_use]
    pub fn new(kind: PowerUpKind) -> Self {
        Self {
            kind,
            color: kind.color(),
            duration: kind.duration(),
            active: false,
            activated_at: None,
        }
    }

    /// Activates the effect as of `now`.
    pub fn activate(&mut self, now: Instant) {
        self.active = true;
        self.activated_at = Some(now);
    }

    /// Deactivates the effect.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.activated_at = None;
    }

    /// Returns true if the effect is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true if the effect has run its full duration as of `now`.
    ///
    /// An inactive power-up is never expired. The boundary is inclusive:
    /// the effect is expired once elapsed time reaches the duration.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.activated_at {
            Some(activated_at) if self.active => {
                now.saturating_duration_since(activated_at) >= self.duration
            }
            _ => false,
        }
    }

    /// Returns the effect time remaining as of `now` (zero if inactive).
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match self.activated_at {
            Some(activated_at) if self.active => self
                .duration
                .saturating_sub(now.saturating_duration_since(activated_at)),
            _ => Duration::ZERO,
        }
    }
}
