//! Entity kind tags.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of entity kinds that can occupy a grid cell.
///
/// Used for diagnostics and for kind checks where an entity handle is
/// expected to resolve to a particular variant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityKind {
    /// One segment of the snake chain.
    SnakePart,
    /// A consumable food item.
    Food,
    /// A collectible timed power-up.
    PowerUp,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::SnakePart => "snake-part",
            EntityKind::Food => "food",
            EntityKind::PowerUp => "power-up",
        };
        write!(f, "{name}")
    }
}
