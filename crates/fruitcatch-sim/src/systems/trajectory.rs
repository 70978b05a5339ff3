//! Trajectory system: per-kind velocity modulation.
//!
//! Runs before movement so the velocity integrated this frame already
//! reflects the current lifetime.

use fruitcatch_core::components::{Lifetime, TrajectoryTag};
use fruitcatch_core::constants::*;
use fruitcatch_core::enums::TrajectoryKind;
use fruitcatch_core::types::{Position, Velocity};

use crate::store::EntityStore;

/// Advance lifetimes and apply trajectory rules.
pub fn run(store: &mut EntityStore, dt: f64) {
    for (_entity, (trajectory, _pos, vel, lifetime)) in store
        .query_mut::<(&TrajectoryTag, &Position, &mut Velocity, &mut Lifetime)>()
    {
        lifetime.elapsed += dt;
        apply(trajectory, vel, lifetime.elapsed, dt);
    }
}

/// Apply one trajectory rule for a frame of `dt`, given the lifetime after
/// this frame.
pub fn apply(trajectory: &TrajectoryTag, vel: &mut Velocity, elapsed: f64, dt: f64) {
    match trajectory.kind {
        TrajectoryKind::Linear => {}
        TrajectoryKind::Zigzag => {
            let amplitude = trajectory.amplitude.unwrap_or(DEFAULT_ZIGZAG_AMPLITUDE);
            let frequency = trajectory.frequency.unwrap_or(DEFAULT_ZIGZAG_FREQUENCY);
            vel.x = amplitude * (elapsed * frequency).sin();
        }
        TrajectoryKind::Accelerated => {
            let acceleration = trajectory.acceleration.unwrap_or(DEFAULT_ACCELERATION);
            vel.y += acceleration * dt;
        }
    }
}
