//! ECS systems that operate on the entity store each tick.
//!
//! Systems are plain functions that take the store (and whatever collaborators
//! they forward to). They do not own state. Per-entity state lives in
//! components, per-session state is passed in by `Session`.

pub mod catcher;
pub mod cleanup;
pub mod collision;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod timer;
pub mod trajectory;

use hecs::Entity;

use fruitcatch_core::components::ViewHandle;

use crate::store::EntityStore;

/// Copy of the entity's view handle, if it has one.
pub(crate) fn view_of(store: &EntityStore, entity: Entity) -> Option<ViewHandle> {
    store.get::<ViewHandle>(entity).map(|view| *view)
}
