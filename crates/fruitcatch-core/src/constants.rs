//! Simulation constants and tuning parameters.
//!
//! Values a host may want to change per session live in `SessionConfig`;
//! everything here is fixed game feel.

// --- Spawning ---

/// Horizontal inset from each field edge for spawn positions.
pub const SPAWN_MARGIN: f64 = 50.0;

/// Drops appear this far above the top edge of the field.
pub const SPAWN_HEIGHT_OFFSET: f64 = 80.0;

/// Probability that a spawn is a hazard rather than a fruit.
pub const HAZARD_PROBABILITY: f64 = 0.15;

/// Initial downward speed of a fruit (units/s).
pub const FRUIT_FALL_SPEED: f64 = 300.0;

/// Initial downward speed of a hazard (units/s).
pub const HAZARD_FALL_SPEED: f64 = 280.0;

/// Tolerance when comparing the spawn accumulator against the interval,
/// so that ten 0.1 s frames count as one full second.
pub const SPAWN_TIMER_EPSILON: f64 = 1e-9;

// --- Fruit trajectory mix ---

/// Cumulative probability of a linear fruit.
pub const TRAJECTORY_LINEAR_CUTOFF: f64 = 0.4;

/// Cumulative probability of linear or zigzag fruit. The rest accelerate.
pub const TRAJECTORY_ZIGZAG_CUTOFF: f64 = 0.8;

/// Zigzag parameters assigned at spawn.
pub const SPAWN_ZIGZAG_AMPLITUDE: f64 = 120.0;
pub const SPAWN_ZIGZAG_FREQUENCY: f64 = 3.0;

/// Vertical acceleration assigned to accelerated fruit at spawn (units/s²).
pub const SPAWN_ACCELERATION: f64 = -700.0;

// --- Trajectory fallbacks for tags without explicit parameters ---

pub const DEFAULT_ZIGZAG_AMPLITUDE: f64 = 80.0;
pub const DEFAULT_ZIGZAG_FREQUENCY: f64 = 2.0;
pub const DEFAULT_ACCELERATION: f64 = -600.0;

// --- Catcher ---

/// Catcher rests this far above the bottom edge.
pub const CATCHER_BASELINE_OFFSET: f64 = 80.0;

/// Drops count as "at catcher height" up to this far above the catcher.
pub const CATCH_HEIGHT_OFFSET: f64 = 40.0;

/// Catcher smoothing rate: lerp factor per second toward the input target.
pub const CATCHER_FOLLOW_RATE: f64 = 10.0;
