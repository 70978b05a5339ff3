//! Per-session configuration.
//!
//! Every field has a default, so a JSON document only needs to name the
//! settings it changes. `validate` is the setup-time gate: a session built
//! from a config that fails it must not start.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::SPAWN_MARGIN;
use crate::enums::FruitKind;
use crate::error::ConfigError;

/// A spawnable fruit and its catch score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FruitConfig {
    pub kind: FruitKind,
    pub score: u32,
}

/// Play-field extents in world units, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSize {
    pub width: f64,
    pub height: f64,
}

/// Configuration for starting a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for determinism. Same seed + same inputs = same session.
    pub seed: u64,
    /// Countdown length in seconds.
    pub duration_secs: f64,
    pub initial_lives: u32,
    /// Lives lost per hazard caught.
    pub hazard_damage: u32,
    /// Seconds between spawns.
    pub spawn_interval_secs: f64,
    pub field: FieldSize,
    /// Half width used when the session respawns its catcher on restart.
    pub catcher_half_width: f64,
    pub fruits: Vec<FruitConfig>,
}

impl Default for FieldSize {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 1280.0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            duration_secs: 60.0,
            initial_lives: 3,
            hazard_damage: 1,
            spawn_interval_secs: 0.8,
            field: FieldSize::default(),
            catcher_half_width: 80.0,
            fruits: FruitKind::ALL
                .iter()
                .map(|&kind| FruitConfig {
                    kind,
                    score: kind.default_score(),
                })
                .collect(),
        }
    }
}

impl SessionConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting a session depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("duration_secs", self.duration_secs)?;
        require_positive("initial_lives", f64::from(self.initial_lives))?;
        require_positive("hazard_damage", f64::from(self.hazard_damage))?;
        require_positive("spawn_interval_secs", self.spawn_interval_secs)?;
        require_positive("field.height", self.field.height)?;
        require_positive("catcher_half_width", self.catcher_half_width)?;

        if !self.field.width.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "field.width",
                value: self.field.width,
            });
        }
        if self.field.width <= 2.0 * SPAWN_MARGIN {
            return Err(ConfigError::FieldTooNarrow {
                width: self.field.width,
                margin: SPAWN_MARGIN,
            });
        }

        if self.fruits.is_empty() {
            return Err(ConfigError::EmptyFruitTable);
        }

        let mut seen = HashSet::new();
        for fruit in &self.fruits {
            if !seen.insert(fruit.kind) {
                return Err(ConfigError::DuplicateFruit(fruit.kind));
            }
            require_positive("fruits.score", f64::from(fruit.score))?;
        }

        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
