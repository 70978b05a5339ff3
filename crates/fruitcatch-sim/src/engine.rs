//! Session engine, the core of the game.
//!
//! `Session` owns the entity store, the session state machine, the spawn
//! timer and the randomness source. The host drives it with `tick(dt)` once
//! per rendered frame and gets a `SessionSnapshot` back. Completely headless:
//! rendering happens behind the `ViewBridge`.

use std::collections::VecDeque;

use hecs::Entity;

use fruitcatch_core::commands::PlayerCommand;
use fruitcatch_core::config::SessionConfig;
use fruitcatch_core::enums::{FruitKind, GamePhase, ViewKind};
use fruitcatch_core::error::ConfigError;
use fruitcatch_core::events::GameEvent;
use fruitcatch_core::state::SessionSnapshot;
use fruitcatch_core::types::SimTime;

use crate::random::{RandomSource, SeededRandom};
use crate::session::{SessionObserver, SessionState};
use crate::store::EntityStore;
use crate::systems;
use crate::systems::spawner::SpawnTimer;
use crate::view::ViewBridge;
use crate::world_setup;

/// One play-through, from reset to game over.
pub struct Session<V: ViewBridge> {
    config: SessionConfig,
    store: EntityStore,
    state: SessionState,
    views: V,
    rng: Box<dyn RandomSource>,
    time: SimTime,
    spawn_timer: SpawnTimer,
    catcher_target_x: f64,
    catcher_half_width: Option<f64>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl<V: ViewBridge> Session<V> {
    /// Create a session with a ChaCha8 source seeded from `config.seed`.
    pub fn new(config: SessionConfig, views: V) -> Result<Self, ConfigError> {
        let rng = Box::new(SeededRandom::new(config.seed));
        Self::with_random(config, views, rng)
    }

    /// Create a session that draws from an injected randomness source.
    ///
    /// Refuses to start if the config is invalid or the view layer cannot
    /// produce every view the session may ask for.
    pub fn with_random(
        config: SessionConfig,
        views: V,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let required = config
            .fruits
            .iter()
            .map(|fruit| ViewKind::Fruit(fruit.kind))
            .chain([ViewKind::Hazard, ViewKind::Catcher]);
        for kind in required {
            if !views.supports(kind) {
                return Err(ConfigError::MissingView(kind));
            }
        }

        log::info!(
            "Session created: {}s, {} lives, {} fruit kinds, seed {}",
            config.duration_secs,
            config.initial_lives,
            config.fruits.len(),
            config.seed
        );

        Ok(Self {
            state: SessionState::new(&config),
            spawn_timer: SpawnTimer::new(config.spawn_interval_secs),
            config,
            store: EntityStore::new(),
            views,
            rng,
            time: SimTime::default(),
            catcher_target_x: 0.0,
            catcher_half_width: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Place the catcher at the bottom center of the field.
    /// Returns `None` if the view layer declines to create it.
    pub fn spawn_catcher(&mut self, half_width: f64) -> Option<Entity> {
        let entity = world_setup::spawn_catcher(
            &mut self.store,
            &mut self.views,
            &self.config.field,
            half_width,
        );
        match entity {
            Some(_) => {
                self.catcher_target_x = world_setup::catcher_spawn_position(&self.config.field).x;
                self.catcher_half_width = Some(half_width);
            }
            None => log::warn!("View factory declined the catcher"),
        }
        entity
    }

    /// Steer the catcher. Takes effect at the next tick.
    pub fn move_catcher_to(&mut self, x: f64) {
        self.queue_command(PlayerCommand::MoveCatcherTo { x });
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.state.add_observer(observer);
    }

    /// Advance the session by one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> SessionSnapshot {
        self.process_commands();

        if !self.state.is_game_over() {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.store, &self.time, &self.state, events)
    }

    /// Clear the field and start a new run with the same configuration.
    /// The catcher is not respawned; see `PlayerCommand::Restart` for that.
    pub fn reset(&mut self) {
        world_setup::teardown(&mut self.store, &mut self.views);
        self.state.reset(&self.config);
        self.spawn_timer = SpawnTimer::new(self.config.spawn_interval_secs);
        self.time = SimTime::default();
        self.catcher_target_x = 0.0;
        self.command_queue.clear();
        self.events.clear();
        log::info!("Session reset");
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Read-only access to the entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn views(&self) -> &V {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut V {
        &mut self.views
    }

    /// Score a fruit kind is worth under this session's fruit table.
    pub fn score_for(&self, kind: FruitKind) -> Option<u32> {
        self.config
            .fruits
            .iter()
            .find(|fruit| fruit.kind == kind)
            .map(|fruit| fruit.score)
    }

    /// Stage a specific layout directly in the store (tests only).
    #[cfg(test)]
    pub fn stage<R>(
        &mut self,
        f: impl FnOnce(&mut EntityStore, &mut V, &fruitcatch_core::config::FieldSize) -> R,
    ) -> R {
        f(&mut self.store, &mut self.views, &self.config.field)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::MoveCatcherTo { x } => {
                self.catcher_target_x = x;
            }
            PlayerCommand::Restart => {
                let half_width = self
                    .catcher_half_width
                    .unwrap_or(self.config.catcher_half_width);
                // Anything queued behind the restart is dropped with the old run.
                self.reset();
                self.spawn_catcher(half_width);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Spawning
        systems::spawner::run(
            &mut self.store,
            &mut self.views,
            self.rng.as_mut(),
            &mut self.spawn_timer,
            &self.state,
            &self.config,
            dt,
            &mut self.events,
        );
        // 2. Countdown
        systems::timer::run(&mut self.state, dt);
        // 3. Trajectory rules (before integration)
        systems::trajectory::run(&mut self.store, dt);
        // 4. Movement integration
        systems::movement::run(&mut self.store, &mut self.views, dt);
        // 5. Catches and hits
        systems::collision::run(
            &mut self.store,
            &mut self.views,
            &mut self.state,
            &mut self.events,
        );
        // 6. Cleanup of fallen drops
        systems::cleanup::run(
            &mut self.store,
            &mut self.views,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 7. Catcher follows player input
        systems::catcher::run(&mut self.store, &mut self.views, self.catcher_target_x, dt);
    }
}

impl<V: ViewBridge> Drop for Session<V> {
    fn drop(&mut self) {
        world_setup::teardown(&mut self.store, &mut self.views);
    }
}
