//! Cleanup system: reclaims drops that fell past their destroy threshold.

use hecs::Entity;

use fruitcatch_core::components::{DestroyBelowY, FruitTag, HazardTag};
use fruitcatch_core::events::GameEvent;
use fruitcatch_core::types::Position;

use crate::store::EntityStore;
use crate::systems::view_of;
use crate::view::ViewBridge;

/// Remove every entity below its `DestroyBelowY` threshold.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
/// Returns how many entities were removed.
pub fn run(
    store: &mut EntityStore,
    views: &mut dyn ViewBridge,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) -> usize {
    despawn_buffer.clear();

    for entity in store.query::<(&Position, &DestroyBelowY)>() {
        let below = match (store.get::<Position>(entity), store.get::<DestroyBelowY>(entity)) {
            (Some(pos), Some(limit)) => pos.y < limit.threshold,
            _ => false,
        };
        if below {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        if let Some(view) = view_of(store, entity) {
            if views.is_valid(view) {
                views.destroy(view);
            }
        }

        if let Some(fruit) = store.get::<FruitTag>(entity).map(|fruit| *fruit) {
            events.push(GameEvent::FruitMissed { kind: fruit.kind });
        } else if store.get::<HazardTag>(entity).is_some() {
            events.push(GameEvent::HazardDodged);
        }

        store.remove(entity);
    }

    if removed > 0 {
        log::debug!("Cleaned up {removed} fallen drop(s)");
    }
    removed
}
