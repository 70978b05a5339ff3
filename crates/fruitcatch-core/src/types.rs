//! Fundamental geometric and simulation types.

use std::ops::{Deref, DerefMut};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in play-field space (world units).
/// Origin at the field center, x = right, y = up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// 2D velocity in play-field space (units/second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec2);

/// Simulation clock. Frames are variable-length, driven by the host.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames simulated since the last reset.
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }
}

impl Deref for Position {
    type Target = DVec2;

    fn deref(&self) -> &DVec2 {
        &self.0
    }
}

impl DerefMut for Position {
    fn deref_mut(&mut self) -> &mut DVec2 {
        &mut self.0
    }
}

impl Deref for Velocity {
    type Target = DVec2;

    fn deref(&self) -> &DVec2 {
        &self.0
    }
}

impl DerefMut for Velocity {
    fn deref_mut(&mut self) -> &mut DVec2 {
        &mut self.0
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.elapsed_secs += dt;
    }
}
