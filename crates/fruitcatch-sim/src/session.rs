//! Session state machine: score, lives and countdown, plus the one-shot game over.
//!
//! Stored in `Session` alongside the entity store, NOT as an ECS entity.
//! Presentation layers subscribe through [`SessionObserver`]; every change is
//! reported synchronously, in the order it happens.

use fruitcatch_core::config::SessionConfig;
use fruitcatch_core::enums::{GameOverReason, GamePhase, SessionOutcome};

/// Receives state-change notifications. All methods default to no-ops.
pub trait SessionObserver {
    fn score_changed(&mut self, _score: u32) {}
    fn lives_changed(&mut self, _lives: u32) {}
    fn time_changed(&mut self, _time_left: f64) {}
    fn game_over(&mut self, _reason: GameOverReason, _final_lives: u32) {}
}

pub struct SessionState {
    score: u32,
    lives: u32,
    time_left: f64,
    is_game_over: bool,
    reason: Option<GameOverReason>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl SessionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            score: 0,
            lives: config.initial_lives,
            time_left: config.duration_secs,
            is_game_over: false,
            reason: None,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn reason(&self) -> Option<GameOverReason> {
        self.reason
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Active
        }
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.reason.map(|reason| reason.outcome(self.lives))
    }

    /// Credit a catch. Never ends the game.
    pub fn add_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
        let score = self.score;
        self.notify(|o| o.score_changed(score));
    }

    /// Take damage, clamping at zero lives.
    ///
    /// Unlike [`tick_time`](Self::tick_time) this keeps running after the game
    /// is over: lives still clamp and observers still hear about it, but the
    /// recorded reason never changes.
    pub fn apply_damage(&mut self, delta: u32) {
        self.lives = self.lives.saturating_sub(delta);
        let lives = self.lives;
        self.notify(|o| o.lives_changed(lives));

        if self.lives == 0 {
            self.end(GameOverReason::OutOfLives);
        }
    }

    /// Run the countdown. Does nothing once the game is over.
    pub fn tick_time(&mut self, dt: f64) {
        if self.is_game_over {
            return;
        }

        self.time_left = (self.time_left - dt).max(0.0);
        let time_left = self.time_left;
        self.notify(|o| o.time_changed(time_left));

        if self.time_left <= 0.0 {
            self.end(GameOverReason::TimeUp);
        }
    }

    /// Start over with fresh values. Observers stay subscribed and are told
    /// the new score, lives and time.
    pub fn reset(&mut self, config: &SessionConfig) {
        self.score = 0;
        self.lives = config.initial_lives;
        self.time_left = config.duration_secs;
        self.is_game_over = false;
        self.reason = None;

        let (score, lives, time_left) = (self.score, self.lives, self.time_left);
        self.notify(|o| {
            o.score_changed(score);
            o.lives_changed(lives);
            o.time_changed(time_left);
        });
    }

    fn end(&mut self, reason: GameOverReason) {
        if self.is_game_over {
            return;
        }

        self.is_game_over = true;
        self.reason = Some(reason);
        log::info!(
            "Game over: {reason:?} (score {}, lives {})",
            self.score,
            self.lives
        );

        let lives = self.lives;
        self.notify(|o| o.game_over(reason, lives));
    }

    fn notify(&mut self, mut f: impl FnMut(&mut dyn SessionObserver)) {
        for observer in &mut self.observers {
            f(observer.as_mut());
        }
    }
}
