//! Setup-time errors. Steady-state simulation never fails.

use crate::enums::{FruitKind, ViewKind};

/// A session refused to start because its configuration is unusable.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A numeric setting is zero, negative or not finite.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A numeric setting is infinite or NaN.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// The play field is too narrow to hold the spawn margins.
    #[error("field width {width} leaves no room inside spawn margins of {margin}")]
    FieldTooNarrow { width: f64, margin: f64 },

    /// No fruit kinds to spawn.
    #[error("fruit table is empty")]
    EmptyFruitTable,

    /// A fruit kind is listed twice.
    #[error("fruit kind {0:?} is listed more than once")]
    DuplicateFruit(FruitKind),

    /// The view factory cannot produce a view the session needs.
    #[error("no view available for {0}")]
    MissingView(ViewKind),

    /// The configuration document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
