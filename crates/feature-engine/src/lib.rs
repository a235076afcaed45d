//! Housing Feature Encoder
//!
//! Turns raw property attributes into the ordered feature vector the
//! pre-trained price model was fit on.

mod features;
mod proximity;
mod schema;

pub use features::{FeatureEncoder, FeatureVector, HousingInput};
pub use proximity::{OceanProximity, INDICATOR_COUNT};
pub use schema::{
    FeatureSchema, IncomeUnits, BASE_NUMERIC_COLUMNS, DERIVED_COLUMNS, INCOME_SCALE,
    INDICATOR_COLUMNS,
};

use thiserror::Error;

/// Errors during feature encoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("Unknown ocean proximity category: {0:?}")]
    UnknownCategory(String),
}
