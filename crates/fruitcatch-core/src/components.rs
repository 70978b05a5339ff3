//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Marks a falling fruit and what catching it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FruitTag {
    pub kind: FruitKind,
    pub score: u32,
}

/// Marks a falling hazard and the lives it costs when caught.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardTag {
    pub damage: u32,
}

/// Marks the player's catcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasketTag {
    /// Half of the catch band width, centered on the catcher's x.
    pub half_width: f64,
}

/// Flight rule with optional per-entity parameters.
/// Unset parameters fall back to the trajectory defaults in `constants`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryTag {
    pub kind: TrajectoryKind,
    pub amplitude: Option<f64>,
    pub frequency: Option<f64>,
    pub acceleration: Option<f64>,
}

/// Seconds since spawn, advanced by the trajectory system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub elapsed: f64,
}

/// Fail-safe: the entity is reclaimed once it drops below this y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DestroyBelowY {
    pub threshold: f64,
}

/// Opaque handle to the entity's external view.
/// The simulation forwards calls with it but never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewHandle(pub u64);

impl TrajectoryTag {
    pub fn linear() -> Self {
        Self::default()
    }

    pub fn zigzag(amplitude: f64, frequency: f64) -> Self {
        Self {
            kind: TrajectoryKind::Zigzag,
            amplitude: Some(amplitude),
            frequency: Some(frequency),
            acceleration: None,
        }
    }

    pub fn accelerated(acceleration: f64) -> Self {
        Self {
            kind: TrajectoryKind::Accelerated,
            amplitude: None,
            frequency: None,
            acceleration: Some(acceleration),
        }
    }
}
