//! Session snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete session state returned after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    /// Countdown remaining (seconds).
    pub time_left: f64,
    pub game_over_reason: Option<GameOverReason>,
    pub outcome: Option<SessionOutcome>,
    /// Drops currently in flight, in store order.
    pub drops: Vec<DropView>,
    pub catcher: Option<CatcherView>,
    /// Events produced during this tick.
    pub events: Vec<GameEvent>,
}

/// A falling fruit or hazard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropView {
    pub view: ViewKind,
    pub position: Position,
    pub trajectory: TrajectoryKind,
}

/// The catcher and its catch band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatcherView {
    pub position: Position,
    pub half_width: f64,
}
