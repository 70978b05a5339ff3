//! Spawn system: drops a new fruit or hazard at a fixed interval.
//!
//! Every draw goes through the injected `RandomSource`, in a fixed order:
//! x position, hazard roll, then (fruit only) kind and trajectory.

use hecs::Entity;

use fruitcatch_core::components::{FruitTag, TrajectoryTag};
use fruitcatch_core::config::SessionConfig;
use fruitcatch_core::constants::*;
use fruitcatch_core::enums::ViewKind;
use fruitcatch_core::events::GameEvent;
use fruitcatch_core::types::Position;

use crate::random::RandomSource;
use crate::session::SessionState;
use crate::store::EntityStore;
use crate::view::ViewBridge;
use crate::world_setup;

/// Spawn cadence: an accumulator checked against a fixed interval.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    pub accumulator: f64,
    pub interval: f64,
}

impl SpawnTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            accumulator: 0.0,
            interval,
        }
    }

    /// Accumulate `dt`. When the interval is reached the accumulator drops
    /// back to exactly zero (any overshoot is discarded) and this returns true.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.accumulator += dt;
        if self.accumulator + SPAWN_TIMER_EPSILON < self.interval {
            return false;
        }
        self.accumulator = 0.0;
        true
    }
}

/// Advance the spawn timer and spawn at most one drop.
#[allow(clippy::too_many_arguments)]
pub fn run(
    store: &mut EntityStore,
    views: &mut dyn ViewBridge,
    rng: &mut dyn RandomSource,
    timer: &mut SpawnTimer,
    state: &SessionState,
    config: &SessionConfig,
    dt: f64,
    events: &mut Vec<GameEvent>,
) -> Option<Entity> {
    if state.is_game_over() {
        return None;
    }

    if !timer.advance(dt) {
        return None;
    }

    spawn_random_drop(store, views, rng, config, events)
}

/// Spawn one randomized drop just above the visible field.
pub fn spawn_random_drop(
    store: &mut EntityStore,
    views: &mut dyn ViewBridge,
    rng: &mut dyn RandomSource,
    config: &SessionConfig,
    events: &mut Vec<GameEvent>,
) -> Option<Entity> {
    let half_width = config.field.width / 2.0;
    let x = rng.range(-half_width + SPAWN_MARGIN, half_width - SPAWN_MARGIN);
    let y = config.field.height / 2.0 + SPAWN_HEIGHT_OFFSET;
    let position = Position::new(x, y);

    let (spawned, kind) = if rng.chance(HAZARD_PROBABILITY) {
        let entity =
            world_setup::spawn_hazard(store, views, &config.field, position, config.hazard_damage);
        (entity, ViewKind::Hazard)
    } else {
        if config.fruits.is_empty() {
            return None;
        }
        let fruit = config.fruits[rng.pick(config.fruits.len())];
        let trajectory = random_trajectory(rng);
        let tag = FruitTag {
            kind: fruit.kind,
            score: fruit.score,
        };
        let entity =
            world_setup::spawn_fruit(store, views, &config.field, position, tag, trajectory);
        (entity, ViewKind::Fruit(fruit.kind))
    };

    match spawned {
        Some(entity) => {
            log::debug!("Spawned {kind} at ({:.1}, {:.1})", position.x, position.y);
            events.push(GameEvent::DropSpawned {
                view: kind,
                position,
            });
            Some(entity)
        }
        None => {
            log::warn!("View factory declined {kind}; drop skipped");
            None
        }
    }
}

/// Weighted trajectory pick for a new fruit: 40% linear, 40% zigzag,
/// 20% accelerated.
pub fn random_trajectory(rng: &mut dyn RandomSource) -> TrajectoryTag {
    let roll = rng.unit();
    if roll < TRAJECTORY_LINEAR_CUTOFF {
        TrajectoryTag::linear()
    } else if roll < TRAJECTORY_ZIGZAG_CUTOFF {
        TrajectoryTag::zigzag(SPAWN_ZIGZAG_AMPLITUDE, SPAWN_ZIGZAG_FREQUENCY)
    } else {
        TrajectoryTag::accelerated(SPAWN_ACCELERATION)
    }
}
