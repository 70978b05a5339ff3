//! Collision system: resolves drops reaching the catcher's catch band.
//!
//! The band is the catcher's x ± half width (inclusive), from the catcher's
//! height up to `CATCH_HEIGHT_OFFSET` above it. Anything at or below the top
//! of the band and inside it horizontally is resolved: fruit scores, hazards
//! cost lives, and both are removed.

use fruitcatch_core::components::{BasketTag, FruitTag, HazardTag};
use fruitcatch_core::constants::CATCH_HEIGHT_OFFSET;
use fruitcatch_core::events::GameEvent;
use fruitcatch_core::types::{Position, Velocity};

use crate::session::SessionState;
use crate::store::EntityStore;
use crate::systems::view_of;
use crate::view::ViewBridge;

/// What one collision pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Candidates visited from the pre-pass snapshot.
    pub examined: usize,
    pub caught: usize,
    pub hits: usize,
}

/// Run the collision pass against the first catcher in store order.
pub fn run(
    store: &mut EntityStore,
    views: &mut dyn ViewBridge,
    state: &mut SessionState,
    events: &mut Vec<GameEvent>,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    // With several catchers only the first is considered.
    let Some(catcher) = store.first::<(&Position, &BasketTag)>() else {
        return report;
    };
    let (catcher_pos, half_width) =
        match (store.get::<Position>(catcher), store.get::<BasketTag>(catcher)) {
            (Some(pos), Some(basket)) => (*pos, basket.half_width),
            _ => return report,
        };

    let catch_y = catcher_pos.y + CATCH_HEIGHT_OFFSET;
    let band = (catcher_pos.x - half_width)..=(catcher_pos.x + half_width);
    let catch_point = Position::new(catcher_pos.x, catch_y);

    for entity in store.snapshot::<(&Position, &Velocity)>() {
        if !store.contains(entity) {
            continue;
        }
        report.examined += 1;

        let view = view_of(store, entity);
        if view.is_some_and(|view| !views.is_valid(view)) {
            continue;
        }

        let Some(position) = store.get::<Position>(entity).map(|pos| *pos) else {
            continue;
        };
        if position.y > catch_y || !band.contains(&position.x) {
            continue;
        }

        let fruit = store.get::<FruitTag>(entity).map(|fruit| *fruit);
        let hazard = store.get::<HazardTag>(entity).map(|hazard| *hazard);

        if let Some(fruit) = fruit {
            log::debug!("Caught {:?} for {} points", fruit.kind, fruit.score);
            state.add_score(fruit.score);
            report.caught += 1;
            events.push(GameEvent::FruitCaught {
                kind: fruit.kind,
                score: fruit.score,
                position,
                catch_point,
            });
        } else if let Some(hazard) = hazard {
            log::debug!("Hazard hit for {} damage", hazard.damage);
            state.apply_damage(hazard.damage);
            report.hits += 1;
            events.push(GameEvent::HazardHit {
                damage: hazard.damage,
                position,
            });
        } else {
            continue;
        }

        store.remove(entity);
        if let Some(view) = view {
            views.destroy(view);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HeadlessViews;
    use fruitcatch_core::components::*;
    use fruitcatch_core::config::SessionConfig;
    use fruitcatch_core::enums::*;

    struct Fixture {
        store: EntityStore,
        views: HeadlessViews,
        state: SessionState,
        events: Vec<GameEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: EntityStore::new(),
                views: HeadlessViews::new(),
                state: SessionState::new(&SessionConfig::default()),
                events: Vec::new(),
            }
        }

        fn catcher(&mut self, x: f64, y: f64) -> hecs::Entity {
            let position = Position::new(x, y);
            let view = self.views.create(ViewKind::Catcher, position).unwrap();
            self.store
                .add((position, BasketTag { half_width: 80.0 }, view))
        }

        fn fruit(&mut self, x: f64, y: f64, score: u32) -> hecs::Entity {
            let kind = FruitKind::Apple;
            let position = Position::new(x, y);
            let view = self.views.create(ViewKind::Fruit(kind), position).unwrap();
            self.store.add((
                position,
                Velocity::new(0.0, -300.0),
                FruitTag { kind, score },
                view,
            ))
        }

        fn hazard(&mut self, x: f64, y: f64, damage: u32) -> hecs::Entity {
            let position = Position::new(x, y);
            let view = self.views.create(ViewKind::Hazard, position).unwrap();
            self.store.add((
                position,
                Velocity::new(0.0, -280.0),
                HazardTag { damage },
                view,
            ))
        }

        fn run(&mut self) -> CollisionReport {
            run(
                &mut self.store,
                &mut self.views,
                &mut self.state,
                &mut self.events,
            )
        }
    }

    const CATCHER_Y: f64 = -560.0;
    const CATCH_Y: f64 = CATCHER_Y + CATCH_HEIGHT_OFFSET;

    #[test]
    fn fruit_in_band_is_caught() {
        let mut fx = Fixture::new();
        fx.catcher(0.0, CATCHER_Y);
        let fruit = fx.fruit(50.0, CATCH_Y - 1.0, 10);
        let view = *fx.store.get::<ViewHandle>(fruit).unwrap();

        let report = fx.run();

        assert_eq!(fx.state.score(), 10);
        assert!(!fx.store.contains(fruit));
        assert!(!fx.views.is_valid(view));
        assert_eq!(report.caught, 1);
        assert!(matches!(
            fx.events.as_slice(),
            [GameEvent::FruitCaught { score: 10, catch_point, .. }]
                if *catch_point == Position::new(0.0, CATCH_Y)
        ));
    }

    #[test]
    fn hazard_in_band_costs_a_life() {
        let mut fx = Fixture::new();
        fx.catcher(0.0, CATCHER_Y);
        let hazard = fx.hazard(-20.0, CATCH_Y, 1);

        let report = fx.run();

        assert_eq!(fx.state.lives(), 2);
        assert_eq!(fx.state.score(), 0);
        assert!(!fx.store.contains(hazard));
        assert_eq!(report.hits, 1);
        assert_eq!(
            fx.events,
            vec![GameEvent::HazardHit {
                damage: 1,
                position: Position::new(-20.0, CATCH_Y)
            }]
        );
    }

    #[test]
    fn band_edges_are_inclusive() {
        let mut fx = Fixture::new();
        fx.catcher(100.0, CATCHER_Y);
        let left = fx.fruit(20.0, CATCH_Y, 10);
        let right = fx.fruit(180.0, CATCH_Y, 10);
        let outside = fx.fruit(180.5, CATCH_Y, 10);

        fx.run();

        assert!(!fx.store.contains(left));
        assert!(!fx.store.contains(right));
        assert!(fx.store.contains(outside));
        assert_eq!(fx.state.score(), 20);
    }

    #[test]
    fn drops_above_catch_height_are_untouched() {
        let mut fx = Fixture::new();
        fx.catcher(0.0, CATCHER_Y);
        let high = fx.fruit(0.0, CATCH_Y + 0.5, 10);

        let report = fx.run();

        assert!(fx.store.contains(high));
        assert_eq!(report, CollisionReport { examined: 1, caught: 0, hits: 0 });
        assert!(fx.events.is_empty());
    }

    #[test]
    fn no_catcher_is_a_no_op() {
        let mut fx = Fixture::new();
        let fruit = fx.fruit(0.0, -1000.0, 10);

        let report = fx.run();

        assert_eq!(report, CollisionReport::default());
        assert!(fx.store.contains(fruit));
        assert_eq!(fx.state.score(), 0);
    }

    #[test]
    fn invalid_views_are_skipped() {
        let mut fx = Fixture::new();
        fx.catcher(0.0, CATCHER_Y);
        let fruit = fx.fruit(0.0, CATCH_Y - 5.0, 10);
        let view = *fx.store.get::<ViewHandle>(fruit).unwrap();
        fx.views.invalidate(view);

        fx.run();

        assert!(fx.store.contains(fruit));
        assert_eq!(fx.state.score(), 0);
    }

    #[test]
    fn removal_during_pass_visits_every_candidate_once() {
        let mut fx = Fixture::new();
        fx.catcher(0.0, CATCHER_Y);
        let a = fx.fruit(0.0, CATCH_Y - 1.0, 10);
        let b = fx.fruit(300.0, CATCH_Y - 1.0, 10);
        let c = fx.hazard(10.0, CATCH_Y - 1.0, 1);
        let d = fx.fruit(0.0, 400.0, 10);
        let e = fx.fruit(-30.0, CATCH_Y - 1.0, 20);

        let report = fx.run();

        assert_eq!(report, CollisionReport { examined: 5, caught: 2, hits: 1 });
        assert_eq!(fx.store.snapshot::<(&Position, &Velocity)>(), vec![b, d]);
        assert!(!fx.store.contains(a) && !fx.store.contains(c) && !fx.store.contains(e));
        assert_eq!(fx.state.score(), 30);
        assert_eq!(fx.state.lives(), 2);
    }

    #[test]
    fn first_catcher_in_store_order_wins() {
        let mut fx = Fixture::new();
        fx.catcher(-200.0, CATCHER_Y);
        fx.catcher(200.0, CATCHER_Y);
        let under_first = fx.fruit(-200.0, CATCH_Y, 10);
        let under_second = fx.fruit(200.0, CATCH_Y, 10);

        fx.run();

        assert!(!fx.store.contains(under_first));
        assert!(fx.store.contains(under_second));
    }

    #[test]
    fn hazard_after_game_over_still_resolves() {
        let mut fx = Fixture::new();
        fx.state.tick_time(60.0);
        fx.catcher(0.0, CATCHER_Y);
        fx.hazard(0.0, CATCH_Y, 1);

        fx.run();

        assert_eq!(fx.state.lives(), 2);
        assert_eq!(fx.state.reason(), Some(GameOverReason::TimeUp));
    }
}
