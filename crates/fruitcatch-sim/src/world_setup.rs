//! Entity spawn factories.
//!
//! Creates the catcher and falling drops with complete component bundles, so
//! a falling entity always carries velocity, trajectory, lifetime and its
//! destroy threshold together.

use hecs::Entity;

use fruitcatch_core::components::*;
use fruitcatch_core::config::FieldSize;
use fruitcatch_core::constants::*;
use fruitcatch_core::enums::*;
use fruitcatch_core::types::{Position, Velocity};

use crate::store::EntityStore;
use crate::view::ViewBridge;

/// Where a new catcher rests: horizontally centered, just above the bottom edge.
pub fn catcher_spawn_position(field: &FieldSize) -> Position {
    Position::new(0.0, -field.height / 2.0 + CATCHER_BASELINE_OFFSET)
}

/// Spawn the player's catcher. Returns `None` if the view factory declines.
pub fn spawn_catcher(
    store: &mut EntityStore,
    views: &mut dyn ViewBridge,
    field: &FieldSize,
    half_width: f64,
) -> Option<Entity> {
    let position = catcher_spawn_position(field);
    let view = views.create(ViewKind::Catcher, position)?;
    views.set_position(view, position);

    Some(store.add((position, BasketTag { half_width }, view)))
}

/// Spawn a falling fruit at `position`.
pub fn spawn_fruit(
    store: &mut EntityStore,
    views: &mut dyn ViewBridge,
    field: &FieldSize,
    position: Position,
    fruit: FruitTag,
    trajectory: TrajectoryTag,
) -> Option<Entity> {
    let view = views.create(ViewKind::Fruit(fruit.kind), position)?;
    views.set_position(view, position);

    Some(store.add((
        position,
        Velocity::new(0.0, -FRUIT_FALL_SPEED),
        fruit,
        trajectory,
        Lifetime::default(),
        DestroyBelowY {
            threshold: -field.height / 2.0,
        },
        view,
    )))
}

/// Spawn a falling hazard at `position`. Hazards always fall straight.
pub fn spawn_hazard(
    store: &mut EntityStore,
    views: &mut dyn ViewBridge,
    field: &FieldSize,
    position: Position,
    damage: u32,
) -> Option<Entity> {
    let view = views.create(ViewKind::Hazard, position)?;
    views.set_position(view, position);

    Some(store.add((
        position,
        Velocity::new(0.0, -HAZARD_FALL_SPEED),
        HazardTag { damage },
        TrajectoryTag::linear(),
        Lifetime::default(),
        DestroyBelowY {
            threshold: -field.height / 2.0,
        },
        view,
    )))
}

/// Forward destroy for every live view, then empty the store.
pub fn teardown(store: &mut EntityStore, views: &mut dyn ViewBridge) {
    for entity in store.snapshot::<&ViewHandle>() {
        if let Some(view) = store.get::<ViewHandle>(entity).map(|v| *v) {
            if views.is_valid(view) {
                views.destroy(view);
            }
        }
    }
    store.clear();
}
