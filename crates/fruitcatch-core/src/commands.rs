//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Steer the catcher toward a horizontal position (field units).
    MoveCatcherTo { x: f64 },
    /// Start a fresh run: clear the field, reset state, respawn the catcher.
    Restart,
}
