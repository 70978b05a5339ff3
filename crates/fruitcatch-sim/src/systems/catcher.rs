//! Catcher control: eases every catcher toward the player's target x.
//!
//! Not a simulation rule. It only moves catchers in response to input, but
//! it shares the store, so it runs inside the session tick.

use fruitcatch_core::components::{BasketTag, ViewHandle};
use fruitcatch_core::constants::CATCHER_FOLLOW_RATE;
use fruitcatch_core::types::Position;

use crate::store::EntityStore;
use crate::view::ViewBridge;

/// Move catchers a frame's worth toward `target_x` and sync their views.
pub fn run(store: &mut EntityStore, views: &mut dyn ViewBridge, target_x: f64, dt: f64) {
    let factor = (dt * CATCHER_FOLLOW_RATE).clamp(0.0, 1.0);

    for (_entity, (pos, _basket, view)) in
        store.query_mut::<(&mut Position, &BasketTag, Option<&ViewHandle>)>()
    {
        pos.x += (target_x - pos.x) * factor;

        if let Some(&view) = view {
            views.set_position(view, *pos);
        }
    }
}
