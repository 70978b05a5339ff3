//! Bridge to the external view layer.
//!
//! The simulation never renders. It asks the bridge for a view when it spawns
//! something, forwards position updates and destroy calls, and checks whether
//! a view is still alive before acting on its entity.

use std::collections::{HashMap, HashSet};

use fruitcatch_core::components::ViewHandle;
use fruitcatch_core::enums::ViewKind;
use fruitcatch_core::types::Position;

pub trait ViewBridge {
    /// Whether the factory can produce views of this kind at all.
    fn supports(&self, _kind: ViewKind) -> bool {
        true
    }

    /// Instantiate a view. `None` means the factory declined.
    fn create(&mut self, kind: ViewKind, position: Position) -> Option<ViewHandle>;

    fn set_position(&mut self, view: ViewHandle, position: Position);

    /// Destroy a view. Destroying an invalid view is a no-op.
    fn destroy(&mut self, view: ViewHandle);

    fn is_valid(&self, view: ViewHandle) -> bool;
}

/// In-memory view layer for headless hosts and tests.
#[derive(Debug, Default)]
pub struct HeadlessViews {
    next_id: u64,
    live: HashMap<ViewHandle, (ViewKind, Position)>,
    unavailable: HashSet<ViewKind>,
    destroyed: Vec<ViewHandle>,
}

impl HeadlessViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view layer that has no prefab for `kind`.
    pub fn without(kind: ViewKind) -> Self {
        let mut views = Self::default();
        views.unavailable.insert(kind);
        views
    }

    /// Simulate the view being torn down behind the simulation's back.
    pub fn invalidate(&mut self, view: ViewHandle) {
        self.live.remove(&view);
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn position_of(&self, view: ViewHandle) -> Option<Position> {
        self.live.get(&view).map(|&(_, position)| position)
    }

    pub fn kind_of(&self, view: ViewHandle) -> Option<ViewKind> {
        self.live.get(&view).map(|&(kind, _)| kind)
    }

    /// Every view destroyed through the bridge, in call order.
    pub fn destroyed(&self) -> &[ViewHandle] {
        &self.destroyed
    }
}

impl ViewBridge for HeadlessViews {
    fn supports(&self, kind: ViewKind) -> bool {
        !self.unavailable.contains(&kind)
    }

    fn create(&mut self, kind: ViewKind, position: Position) -> Option<ViewHandle> {
        if !self.supports(kind) {
            return None;
        }
        let view = ViewHandle(self.next_id);
        self.next_id += 1;
        self.live.insert(view, (kind, position));
        Some(view)
    }

    fn set_position(&mut self, view: ViewHandle, position: Position) {
        if let Some(entry) = self.live.get_mut(&view) {
            entry.1 = position;
        }
    }

    fn destroy(&mut self, view: ViewHandle) {
        if self.live.remove(&view).is_some() {
            self.destroyed.push(view);
        }
    }

    fn is_valid(&self, view: ViewHandle) -> bool {
        self.live.contains_key(&view)
    }
}
