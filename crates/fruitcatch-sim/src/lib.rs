//! Simulation engine for FRUITCATCH.
//!
//! Owns the entity store and session state, runs the per-frame systems in a
//! fixed order, and produces `SessionSnapshot`s for the host.

pub mod engine;
pub mod random;
pub mod session;
pub mod store;
pub mod systems;
pub mod view;
pub mod world_setup;

pub use engine::Session;
pub use fruitcatch_core as core;
pub use random::{RandomSource, SeededRandom};
pub use session::{SessionObserver, SessionState};
pub use store::EntityStore;
pub use view::{HeadlessViews, ViewBridge};

#[cfg(test)]
mod tests;
