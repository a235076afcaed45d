//! Validation Error Types

use serde::Serialize;
use thiserror::Error;

/// Errors during input validation
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite value
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Count below zero
    #[error("{field} value {value} must not be negative")]
    Negative { field: &'static str, value: f64 },

    /// Ratios need at least one household
    #[error("households must be greater than zero when per-household ratios are used")]
    NoHouseholds,
}
