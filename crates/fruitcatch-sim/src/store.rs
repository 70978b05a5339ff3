//! Entity store: a hecs world plus a stable insertion order.
//!
//! hecs iterates by archetype, so the order in which entities come back from
//! `World::query` changes whenever an entity's component set differs from its
//! neighbours'. The store keeps its own insertion-ordered index so that
//! capability queries, snapshots and "first match" lookups are deterministic
//! and survive removals without reordering the remaining entities.
//!
//! Two ways to iterate:
//! - [`EntityStore::query`] is lazy and borrows the store immutably, so the
//!   borrow checker rules out structural changes while it is alive.
//! - [`EntityStore::snapshot`] materializes the candidate list up front. Passes
//!   that remove entities iterate a snapshot and re-check [`EntityStore::contains`]
//!   for each candidate.

use hecs::{Component, DynamicBundle, Entity, Query, QueryMut, Ref, World};

#[derive(Default)]
pub struct EntityStore {
    world: World,
    order: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entity built from a component bundle.
    pub fn add(&mut self, bundle: impl DynamicBundle) -> Entity {
        let entity = self.world.spawn(bundle);
        self.order.push(entity);
        entity
    }

    /// Remove an entity. Returns `false` (and does nothing) if it is already gone.
    pub fn remove(&mut self, entity: Entity) -> bool {
        if self.world.despawn(entity).is_err() {
            return false;
        }
        if let Some(index) = self.order.iter().position(|&e| e == entity) {
            self.order.remove(index);
        }
        true
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.world.clear();
        self.order.clear();
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All live entities in store order.
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    /// Whether `entity` is alive and holds every component in `Q`.
    pub fn satisfies<Q: Query>(&self, entity: Entity) -> bool {
        self.world.satisfies::<Q>(entity).unwrap_or(false)
    }

    /// Lazily iterate entities that hold every component in `Q`, in store order.
    pub fn query<Q: Query>(&self) -> impl Iterator<Item = Entity> + '_ {
        self.order
            .iter()
            .copied()
            .filter(move |&entity| self.satisfies::<Q>(entity))
    }

    /// Materialize the current matches of `Q` into a fixed list.
    pub fn snapshot<Q: Query>(&self) -> Vec<Entity> {
        self.query::<Q>().collect()
    }

    /// First entity in store order that matches `Q`.
    pub fn first<Q: Query>(&self) -> Option<Entity> {
        self.query::<Q>().next()
    }

    /// Shared borrow of one component.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<Ref<'_, T>> {
        self.world.get::<&T>(entity).ok()
    }

    /// Mutable access to several components of one entity.
    pub fn query_one_mut<Q: Query>(&mut self, entity: Entity) -> Option<Q::Item<'_>> {
        self.world.query_one_mut::<Q>(entity).ok()
    }

    /// In-place component mutation over every match of `Q`.
    /// Iteration order follows hecs archetypes, not store order.
    pub fn query_mut<Q: Query>(&mut self) -> QueryMut<'_, Q> {
        self.world.query_mut::<Q>()
    }
}
