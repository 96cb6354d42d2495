//! Session orchestration, saved state, and logging setup for Slither.
//!
//! This crate provides:
//! - [`GameSession`] - Tick-driven orchestration over the engine
//! - [`SavedState`] / [`StateStore`] - Score and level persistence
//! - [`init_tracing`] - Subscriber setup for embedding binaries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod logging;
mod session;
mod state;

pub use logging::init_tracing;
pub use session::GameSession;
pub use state::{JsonFileStateStore, NullStateStore, SavedState, StateStore};
