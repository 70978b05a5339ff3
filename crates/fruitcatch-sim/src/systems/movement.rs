//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt,
//! then forwards the new position to the entity's view.

use fruitcatch_core::components::ViewHandle;
use fruitcatch_core::types::{Position, Velocity};

use crate::store::EntityStore;
use crate::view::ViewBridge;

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(store: &mut EntityStore, views: &mut dyn ViewBridge, dt: f64) {
    for (_entity, (pos, vel, view)) in
        store.query_mut::<(&mut Position, &Velocity, Option<&ViewHandle>)>()
    {
        pos.0 += vel.0 * dt;

        if let Some(&view) = view {
            views.set_position(view, *pos);
        }
    }
}
