//! Slither - Grid-based snake simulation core
//!
//! This crate re-exports all layers of the Slither system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: slither_runtime    — Session orchestration, saved state, logging
//! Layer 2: slither_engine     — Movement, collision, consumption, score
//! Layer 1: slither_world      — Locations, grid, entities, environment
//! Layer 0: slither_foundation — Core types (ids, direction, color, Error)
//! ```

pub use slither_engine as engine;
pub use slither_foundation as foundation;
pub use slither_runtime as runtime;
pub use slither_world as world;
