//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Fruit varieties that can be spawned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FruitKind {
    #[default]
    Apple,
    Banana,
    Orange,
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::Apple, FruitKind::Banana, FruitKind::Orange];

    /// Default catch score for this kind.
    pub fn default_score(self) -> u32 {
        match self {
            FruitKind::Apple => 10,
            FruitKind::Banana => 15,
            FruitKind::Orange => 20,
        }
    }
}

/// Flight rule applied to a falling entity by the trajectory system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryKind {
    /// Constant velocity.
    #[default]
    Linear,
    /// Horizontal sine sway.
    Zigzag,
    /// Constant vertical acceleration.
    Accelerated,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// The countdown reached zero.
    TimeUp,
    /// Lives reached zero.
    OutOfLives,
}

impl GameOverReason {
    /// Player-facing result: surviving the clock with lives left is a win.
    pub fn outcome(self, final_lives: u32) -> SessionOutcome {
        match self {
            GameOverReason::TimeUp if final_lives > 0 => SessionOutcome::Victory,
            _ => SessionOutcome::Defeat,
        }
    }
}

/// Final result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Victory,
    Defeat,
}

/// Top-level session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    GameOver,
}

/// What a view (prefab) represents, as requested from the view factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind")]
pub enum ViewKind {
    Fruit(FruitKind),
    Hazard,
    Catcher,
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Fruit(kind) => write!(f, "fruit ({kind:?})"),
            ViewKind::Hazard => f.write_str("hazard"),
            ViewKind::Catcher => f.write_str("catcher"),
        }
    }
}
