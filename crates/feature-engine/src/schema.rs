//! Feature Column Layout
//!
//! The column order here is the contract with the fitted artifacts.
//! Numeric columns come first, then the optional per-household ratios,
//! then the proximity indicators.

use crate::proximity::INDICATOR_COUNT;
use serde::{Deserialize, Serialize};

/// Raw numeric columns in training order
pub const BASE_NUMERIC_COLUMNS: [&str; 8] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
];

/// Per-household ratio columns
pub const DERIVED_COLUMNS: [&str; 3] = [
    "rooms_per_household",
    "bedrooms_per_household",
    "population_per_household",
];

/// Indicator columns; `<1H OCEAN` is the dropped base
pub const INDICATOR_COLUMNS: [&str; INDICATOR_COUNT] = [
    "ocean_proximity_INLAND",
    "ocean_proximity_ISLAND",
    "ocean_proximity_NEAR BAY",
    "ocean_proximity_NEAR OCEAN",
];

/// Dollars per decile income unit
pub const INCOME_SCALE: f64 = 10_000.0;

/// Units the caller supplies median income in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeUnits {
    /// Already in $10,000 units, as in the census data
    #[default]
    Deciles,
    /// Annual income in dollars
    AnnualUsd,
}

impl IncomeUnits {
    /// Convert a raw income value to decile units
    pub fn to_deciles(&self, raw: f64) -> f64 {
        match self {
            IncomeUnits::Deciles => raw,
            IncomeUnits::AnnualUsd => raw / INCOME_SCALE,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeUnits::Deciles => "deciles",
            IncomeUnits::AnnualUsd => "annual_usd",
        }
    }
}

/// Describes which encoding variant a model was fit with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Units of the incoming median income
    #[serde(default)]
    pub income_units: IncomeUnits,
    /// Whether per-household ratios are appended after the numeric columns
    #[serde(default)]
    pub derived_ratios: bool,
}

impl FeatureSchema {
    /// Create a new schema
    pub fn new(income_units: IncomeUnits, derived_ratios: bool) -> Self {
        Self {
            income_units,
            derived_ratios,
        }
    }

    /// Ordered column names
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(self.width());
        columns.extend_from_slice(&BASE_NUMERIC_COLUMNS);
        if self.derived_ratios {
            columns.extend_from_slice(&DERIVED_COLUMNS);
        }
        columns.extend_from_slice(&INDICATOR_COLUMNS);
        columns
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.indicator_offset() + INDICATOR_COUNT
    }

    /// Index of the first indicator column
    pub fn indicator_offset(&self) -> usize {
        BASE_NUMERIC_COLUMNS.len() + if self.derived_ratios { DERIVED_COLUMNS.len() } else { 0 }
    }

    /// Position of a named column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| *c == name)
    }
}
