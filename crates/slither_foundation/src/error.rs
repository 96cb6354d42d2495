//! Error types for the Slither workspace.
//!
//! Uses `thiserror` for ergonomic error definition. The taxonomy follows
//! the engine's failure semantics: invalid inputs and broken chain
//! invariants surface as hard errors; spawn-placement exhaustion and
//! collisions are modeled as ordinary state, never as errors.

use thiserror::Error;

use crate::ids::{EntityId, LocationId};
use crate::kind::EntityKind;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Slither operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an invalid direction code error.
    #[must_use]
    pub fn invalid_direction(code: u8) -> Self {
        Self::new(ErrorKind::InvalidDirection(code))
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity handle error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates a location not found error.
    #[must_use]
    pub fn location_not_found(id: LocationId) -> Self {
        Self::new(ErrorKind::LocationNotFound(id))
    }

    /// Creates an already placed error.
    #[must_use]
    pub fn already_placed(entity: EntityId, location: LocationId) -> Self {
        Self::new(ErrorKind::AlreadyPlaced { entity, location })
    }

    /// Creates an entity kind mismatch error.
    #[must_use]
    pub fn kind_mismatch(entity: EntityId, expected: EntityKind, actual: EntityKind) -> Self {
        Self::new(ErrorKind::KindMismatch {
            entity,
            expected,
            actual,
        })
    }

    /// Creates a broken chain invariant error.
    #[must_use]
    pub fn broken_chain(part: EntityId) -> Self {
        Self::new(ErrorKind::BrokenChain { part })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An out-of-range direction code (valid codes are 0-3).
    #[error("invalid direction code: {0}")]
    InvalidDirection(u8),

    /// Entity handle was never allocated or its slot is free.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity handle outlived the entity (generation mismatch).
    #[error("stale entity handle: {0:?}")]
    StaleEntity(EntityId),

    /// Location id does not address a cell of the current grid.
    #[error("location not found: {0:?}")]
    LocationNotFound(LocationId),

    /// Entity is already placed; callers must remove it first.
    #[error("entity {entity:?} is already placed at {location:?}")]
    AlreadyPlaced {
        /// The entity that was to be placed.
        entity: EntityId,
        /// Where it already sits.
        location: LocationId,
    },

    /// An entity handle resolved to the wrong kind of entity.
    #[error("entity {entity:?} is a {actual}, expected a {expected}")]
    KindMismatch {
        /// The entity that was resolved.
        entity: EntityId,
        /// The kind the caller required.
        expected: EntityKind,
        /// The kind actually found.
        actual: EntityKind,
    },

    /// Chain propagation met a part with no usable predecessor state.
    ///
    /// This indicates a preceding bug, not a recoverable runtime
    /// condition.
    #[error("snake chain broken at part {part:?}")]
    BrokenChain {
        /// The part at which propagation failed.
        part: EntityId,
    },
}
