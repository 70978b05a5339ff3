//! Events emitted by the simulation for presentation and audio feedback.
//!
//! Events are fire-and-forget: they describe what happened during a tick
//! and never feed back into simulation decisions.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Something the presentation layer may want to animate or play a sound for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new drop entered the field.
    DropSpawned { view: ViewKind, position: Position },
    /// A fruit landed in the catcher.
    FruitCaught {
        kind: FruitKind,
        score: u32,
        position: Position,
        /// Where the catch pop animation should converge.
        catch_point: Position,
    },
    /// A hazard landed in the catcher.
    HazardHit { damage: u32, position: Position },
    /// A fruit fell out of the field uncaught.
    FruitMissed { kind: FruitKind },
    /// A hazard fell out of the field without touching the catcher.
    HazardDodged,
}
