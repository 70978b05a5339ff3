//! Tests for the session engine: frame order, catches, cleanup, game over,
//! restart, and determinism.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;

use fruitcatch_core::commands::PlayerCommand;
use fruitcatch_core::components::*;
use fruitcatch_core::config::{FruitConfig, SessionConfig};
use fruitcatch_core::enums::*;
use fruitcatch_core::error::ConfigError;
use fruitcatch_core::events::GameEvent;
use fruitcatch_core::types::{Position, Velocity};

use crate::engine::Session;
use crate::random::RandomSource;
use crate::session::SessionObserver;
use crate::view::{HeadlessViews, ViewBridge};
use crate::world_setup;

const CATCHER_Y: f64 = -560.0;
const CATCH_Y: f64 = -520.0;

fn new_session() -> Session<HeadlessViews> {
    Session::new(SessionConfig::default(), HeadlessViews::new()).unwrap()
}

fn apple() -> FruitTag {
    FruitTag {
        kind: FruitKind::Apple,
        score: 10,
    }
}

fn stage_fruit(session: &mut Session<HeadlessViews>, x: f64, y: f64) -> hecs::Entity {
    session
        .stage(|store, views, field| {
            world_setup::spawn_fruit(
                store,
                views,
                field,
                Position::new(x, y),
                apple(),
                TrajectoryTag::linear(),
            )
        })
        .unwrap()
}

fn stage_hazard(session: &mut Session<HeadlessViews>, x: f64, y: f64) -> hecs::Entity {
    session
        .stage(|store, views, field| {
            world_setup::spawn_hazard(store, views, field, Position::new(x, y), 1)
        })
        .unwrap()
}

#[derive(Debug, Clone, PartialEq)]
enum Note {
    Score(u32),
    Lives(u32),
    GameOver(GameOverReason, u32),
}

/// Records score, lives and game-over notifications (time is too chatty).
struct Recorder(Rc<RefCell<Vec<Note>>>);

impl SessionObserver for Recorder {
    fn score_changed(&mut self, score: u32) {
        self.0.borrow_mut().push(Note::Score(score));
    }
    fn lives_changed(&mut self, lives: u32) {
        self.0.borrow_mut().push(Note::Lives(lives));
    }
    fn game_over(&mut self, reason: GameOverReason, final_lives: u32) {
        self.0.borrow_mut().push(Note::GameOver(reason, final_lives));
    }
}

fn observe(session: &mut Session<HeadlessViews>) -> Rc<RefCell<Vec<Note>>> {
    let notes = Rc::new(RefCell::new(Vec::new()));
    session.add_observer(Box::new(Recorder(notes.clone())));
    notes
}

/// Every spawn is a hazard dropped at the left edge of the spawn range.
struct HazardRain;

impl RandomSource for HazardRain {
    fn range(&mut self, low: f64, _high: f64) -> f64 {
        low
    }
    fn chance(&mut self, _p: f64) -> bool {
        true
    }
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
    fn unit(&mut self) -> f64 {
        0.0
    }
}

// ---- Setup ----

#[test]
fn test_catcher_spawns_at_bottom_center() {
    let mut session = new_session();
    let catcher = session.spawn_catcher(80.0).unwrap();

    let pos = *session.store().get::<Position>(catcher).unwrap();
    assert_eq!(pos, Position::new(0.0, CATCHER_Y));
    assert_relative_eq!(
        session.store().get::<BasketTag>(catcher).unwrap().half_width,
        80.0
    );

    let snap = session.tick(0.016);
    let catcher_view = snap.catcher.unwrap();
    assert_relative_eq!(catcher_view.half_width, 80.0);
    assert_eq!(session.views().live_count(), 1);
}

#[test]
fn test_missing_view_refuses_to_start() {
    let result = Session::new(
        SessionConfig::default(),
        HeadlessViews::without(ViewKind::Catcher),
    );
    assert!(matches!(
        result,
        Err(ConfigError::MissingView(ViewKind::Catcher))
    ));

    let result = Session::new(
        SessionConfig::default(),
        HeadlessViews::without(ViewKind::Fruit(FruitKind::Orange)),
    );
    assert!(matches!(
        result,
        Err(ConfigError::MissingView(ViewKind::Fruit(FruitKind::Orange)))
    ));

    let result = Session::new(
        SessionConfig::default(),
        HeadlessViews::without(ViewKind::Hazard),
    );
    assert!(matches!(
        result,
        Err(ConfigError::MissingView(ViewKind::Hazard))
    ));
}

#[test]
fn test_unused_fruit_view_is_not_required() {
    let config = SessionConfig {
        fruits: vec![FruitConfig {
            kind: FruitKind::Apple,
            score: 10,
        }],
        ..Default::default()
    };
    let views = HeadlessViews::without(ViewKind::Fruit(FruitKind::Orange));
    let session = Session::new(config, views);
    assert!(session.is_ok());
    assert_eq!(session.unwrap().score_for(FruitKind::Apple), Some(10));
}

#[test]
fn test_invalid_config_refuses_to_start() {
    let config = SessionConfig {
        spawn_interval_secs: 0.0,
        ..Default::default()
    };
    let result = Session::new(config, HeadlessViews::new());
    assert!(matches!(
        result,
        Err(ConfigError::NonPositive {
            field: "spawn_interval_secs",
            ..
        })
    ));
}

#[test]
fn test_huge_field_spawns_without_panicking() {
    let mut config = SessionConfig::default();
    config.field.width = f64::MAX;
    let mut session = Session::new(config, HeadlessViews::new()).unwrap();

    let mut snap = session.tick(0.1);
    for _ in 0..7 {
        snap = session.tick(0.1);
    }

    assert_eq!(snap.drops.len(), 1);
    assert!(snap.drops[0].position.x.is_finite());
}

// ---- Frame order ----

#[test]
fn test_spawn_cadence_through_tick() {
    let mut session = new_session();

    for tick in 1..=7 {
        let snap = session.tick(0.1);
        assert!(snap.drops.is_empty(), "unexpected drop on tick {tick}");
    }

    let snap = session.tick(0.1);
    assert_eq!(snap.drops.len(), 1);
    assert!(matches!(
        snap.events.as_slice(),
        [GameEvent::DropSpawned { .. }]
    ));

    // Events are per tick.
    let snap = session.tick(0.1);
    assert!(snap.events.is_empty());
}

#[test]
fn test_new_drop_moves_in_its_spawn_frame() {
    let mut session = new_session();
    let mut snap = session.tick(0.1);
    for _ in 0..7 {
        snap = session.tick(0.1);
    }

    // Spawned at y = 720 and integrated once in the same frame.
    assert_eq!(snap.drops.len(), 1);
    assert!(snap.drops[0].position.y < 720.0);
}

#[test]
fn test_trajectory_runs_before_movement() {
    let mut session = new_session();
    let fruit = session
        .stage(|store, views, field| {
            world_setup::spawn_fruit(
                store,
                views,
                field,
                Position::new(0.0, 600.0),
                apple(),
                TrajectoryTag::zigzag(120.0, 3.0),
            )
        })
        .unwrap();

    session.tick(0.1);

    let vel = *session.store().get::<Velocity>(fruit).unwrap();
    let pos = *session.store().get::<Position>(fruit).unwrap();
    let sway = 120.0 * 0.3_f64.sin();
    assert_relative_eq!(vel.x, sway, epsilon = 1e-9);
    assert_relative_eq!(pos.x, sway * 0.1, epsilon = 1e-9);
    assert_relative_eq!(pos.y, 570.0, epsilon = 1e-9);
    assert_relative_eq!(
        session.store().get::<Lifetime>(fruit).unwrap().elapsed,
        0.1,
        epsilon = 1e-12
    );
}

#[test]
fn test_views_follow_movement() {
    let mut session = new_session();
    let fruit = stage_fruit(&mut session, 40.0, 300.0);
    let view = *session.store().get::<ViewHandle>(fruit).unwrap();

    session.tick(0.2);

    let shown = session.views().position_of(view).unwrap();
    assert_relative_eq!(shown.x, 40.0);
    assert_relative_eq!(shown.y, 240.0, epsilon = 1e-9);
}

// ---- Catches, hits, misses ----

#[test]
fn test_fruit_falls_into_catcher() {
    let mut session = new_session();
    let notes = observe(&mut session);
    session.spawn_catcher(80.0);
    let fruit = stage_fruit(&mut session, 50.0, CATCH_Y + 10.0);
    let view = *session.store().get::<ViewHandle>(fruit).unwrap();

    let snap = session.tick(0.1);

    assert_eq!(snap.score, 10);
    assert!(!session.store().contains(fruit));
    assert!(!session.views().is_valid(view));
    assert!(snap.drops.is_empty());
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::FruitCaught { score: 10, .. })));
    assert_eq!(*notes.borrow(), vec![Note::Score(10)]);
}

#[test]
fn test_hazard_falls_into_catcher() {
    let mut session = new_session();
    session.spawn_catcher(80.0);
    let hazard = stage_hazard(&mut session, -60.0, CATCH_Y + 5.0);

    let snap = session.tick(0.1);

    assert_eq!(snap.lives, 2);
    assert!(!session.store().contains(hazard));
    assert_eq!(snap.phase, GamePhase::Active);
}

#[test]
fn test_missed_fruit_is_cleaned_up() {
    let mut session = new_session();
    session.spawn_catcher(80.0);
    // Outside the band, just above the destroy threshold of -640.
    let fruit = stage_fruit(&mut session, 300.0, -630.0);

    let snap = session.tick(0.1);

    assert!(!session.store().contains(fruit));
    assert_eq!(snap.score, 0);
    assert!(snap.events.contains(&GameEvent::FruitMissed {
        kind: FruitKind::Apple
    }));
    // Only the catcher view is left.
    assert_eq!(session.views().live_count(), 1);
}

#[test]
fn test_catcher_follows_input() {
    let mut session = new_session();
    let catcher = session.spawn_catcher(80.0).unwrap();

    session.move_catcher_to(200.0);
    session.tick(0.05);
    assert_relative_eq!(
        session.store().get::<Position>(catcher).unwrap().x,
        100.0,
        epsilon = 1e-9
    );

    for _ in 0..60 {
        session.tick(0.05);
    }
    assert_relative_eq!(
        session.store().get::<Position>(catcher).unwrap().x,
        200.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_only_first_catcher_moves_the_band() {
    let mut session = new_session();
    session.spawn_catcher(80.0);
    session.spawn_catcher(80.0);

    let snap = session.tick(0.016);
    let catcher = snap.catcher.unwrap();
    assert_eq!(catcher.position, Position::new(0.0, CATCHER_Y));
    assert_eq!(
        session.store().snapshot::<&BasketTag>().len(),
        2,
        "both catchers stay in the store"
    );
}

// ---- Game over ----

#[test]
fn test_time_up_through_ticks() {
    let config = SessionConfig {
        duration_secs: 1.0,
        ..Default::default()
    };
    let mut session = Session::new(config, HeadlessViews::new()).unwrap();
    let notes = observe(&mut session);
    session.spawn_catcher(80.0);

    session.tick(0.5);
    let snap = session.tick(0.5);
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.time_left, 0.0);
    assert_eq!(snap.game_over_reason, Some(GameOverReason::TimeUp));
    assert_eq!(snap.outcome, Some(SessionOutcome::Victory));
    assert_eq!(
        *notes.borrow(),
        vec![Note::GameOver(GameOverReason::TimeUp, 3)]
    );

    // Nothing runs after game over.
    let frame = session.time().frame;
    let drops = snap.drops.len();
    for _ in 0..20 {
        let snap = session.tick(0.1);
        assert_eq!(snap.drops.len(), drops);
    }
    assert_eq!(session.time().frame, frame);
}

#[test]
fn test_out_of_lives_through_ticks() {
    let mut session = new_session();
    let notes = observe(&mut session);
    session.spawn_catcher(80.0);
    for x in [-40.0, 0.0, 40.0] {
        stage_hazard(&mut session, x, CATCH_Y + 5.0);
    }

    let snap = session.tick(0.1);

    assert_eq!(snap.lives, 0);
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert_eq!(snap.game_over_reason, Some(GameOverReason::OutOfLives));
    assert_eq!(snap.outcome, Some(SessionOutcome::Defeat));
    assert_eq!(
        *notes.borrow(),
        vec![
            Note::Lives(2),
            Note::Lives(1),
            Note::Lives(0),
            Note::GameOver(GameOverReason::OutOfLives, 0),
        ]
    );
}

#[test]
fn test_rest_of_frame_runs_after_time_up() {
    let config = SessionConfig {
        duration_secs: 0.1,
        ..Default::default()
    };
    let mut session = Session::new(config, HeadlessViews::new()).unwrap();
    session.spawn_catcher(80.0);
    stage_hazard(&mut session, 0.0, CATCH_Y + 5.0);

    // The countdown ends before collision runs in this frame; the hit still lands.
    let snap = session.tick(0.1);

    assert_eq!(snap.game_over_reason, Some(GameOverReason::TimeUp));
    assert_eq!(snap.lives, 2);
    assert_eq!(snap.outcome, Some(SessionOutcome::Victory));
}

#[test]
fn test_injected_random_drives_spawns() {
    let config = SessionConfig {
        initial_lives: 1,
        ..Default::default()
    };
    let mut session =
        Session::with_random(config, HeadlessViews::new(), Box::new(HazardRain)).unwrap();
    session.spawn_catcher(80.0);
    // Park the catcher under the hazard lane at x = -310.
    session.move_catcher_to(-310.0);

    let mut snap = session.tick(0.1);
    for _ in 0..200 {
        if snap.phase == GamePhase::GameOver {
            break;
        }
        snap = session.tick(0.1);
    }

    assert_eq!(snap.game_over_reason, Some(GameOverReason::OutOfLives));
    assert_eq!(snap.score, 0);
}

// ---- Reset / restart ----

#[test]
fn test_reset_clears_everything() {
    let mut session = new_session();
    session.spawn_catcher(80.0);
    for _ in 0..40 {
        session.tick(0.1);
    }
    assert!(session.views().live_count() > 1);

    session.reset();

    assert!(session.store().is_empty());
    assert_eq!(session.views().live_count(), 0);
    assert_eq!(session.time().frame, 0);
    assert_eq!(session.state().score(), 0);
    assert_eq!(session.state().lives(), 3);
    assert_relative_eq!(session.state().time_left(), 60.0);

    // The spawn clock starts over too.
    for _ in 0..7 {
        assert!(session.tick(0.1).drops.is_empty());
    }
    assert_eq!(session.tick(0.1).drops.len(), 1);
}

#[test]
fn test_restart_after_game_over() {
    let config = SessionConfig {
        duration_secs: 0.5,
        ..Default::default()
    };
    let mut session = Session::new(config, HeadlessViews::new()).unwrap();
    session.spawn_catcher(64.0);
    session.tick(0.5);
    assert_eq!(session.phase(), GamePhase::GameOver);

    session.queue_command(PlayerCommand::Restart);
    let snap = session.tick(0.1);

    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.game_over_reason, None);
    assert_relative_eq!(snap.time_left, 0.4, epsilon = 1e-9);
    let catcher = snap.catcher.unwrap();
    assert_relative_eq!(catcher.half_width, 64.0);
    assert_eq!(session.store().len(), 1);
}

// ---- Determinism ----

fn run_session(seed: u64, frames: usize) -> Vec<String> {
    let config = SessionConfig {
        seed,
        ..Default::default()
    };
    let mut session = Session::new(config, HeadlessViews::new()).unwrap();
    session.spawn_catcher(80.0);

    (0..frames)
        .map(|i| {
            if i % 30 == 0 {
                session.move_catcher_to(((i as f64) * 7.0) % 500.0 - 250.0);
            }
            serde_json::to_string(&session.tick(1.0 / 60.0)).unwrap()
        })
        .collect()
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(run_session(12345, 600), run_session(12345, 600));
}

#[test]
fn test_determinism_different_seeds() {
    assert_ne!(run_session(111, 600), run_session(222, 600));
}
