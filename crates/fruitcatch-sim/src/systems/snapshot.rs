//! Snapshot system: reads the store and session state into a SessionSnapshot.
//!
//! Read-only: it never modifies the store.

use fruitcatch_core::components::*;
use fruitcatch_core::enums::ViewKind;
use fruitcatch_core::events::GameEvent;
use fruitcatch_core::state::*;
use fruitcatch_core::types::{Position, SimTime, Velocity};

use crate::session::SessionState;
use crate::store::EntityStore;

/// Build a complete SessionSnapshot from the current store and state.
pub fn build_snapshot(
    store: &EntityStore,
    time: &SimTime,
    state: &SessionState,
    events: Vec<GameEvent>,
) -> SessionSnapshot {
    SessionSnapshot {
        time: *time,
        phase: state.phase(),
        score: state.score(),
        lives: state.lives(),
        time_left: state.time_left(),
        game_over_reason: state.reason(),
        outcome: state.outcome(),
        drops: build_drops(store),
        catcher: build_catcher(store),
        events,
    }
}

/// Falling fruit and hazards, in store order.
fn build_drops(store: &EntityStore) -> Vec<DropView> {
    store
        .query::<(&Position, &Velocity, &TrajectoryTag)>()
        .filter_map(|entity| {
            let view = if let Some(fruit) = store.get::<FruitTag>(entity) {
                ViewKind::Fruit(fruit.kind)
            } else if store.get::<HazardTag>(entity).is_some() {
                ViewKind::Hazard
            } else {
                return None;
            };
            Some(DropView {
                view,
                position: *store.get::<Position>(entity)?,
                trajectory: store.get::<TrajectoryTag>(entity)?.kind,
            })
        })
        .collect()
}

/// The catcher the collision system would use.
fn build_catcher(store: &EntityStore) -> Option<CatcherView> {
    let entity = store.first::<(&Position, &BasketTag)>()?;
    Some(CatcherView {
        position: *store.get::<Position>(entity)?,
        half_width: store.get::<BasketTag>(entity)?.half_width,
    })
}
