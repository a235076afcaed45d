//! Feature Vector Assembly

use crate::proximity::OceanProximity;
use crate::schema::{FeatureSchema, BASE_NUMERIC_COLUMNS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw property attributes as collected from the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingInput {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    /// Median income, in the units named by the schema
    pub median_income: f64,
    pub ocean_proximity: OceanProximity,
}

impl Default for HousingInput {
    fn default() -> Self {
        Self {
            longitude: -118.0,
            latitude: 34.0,
            housing_median_age: 15.0,
            total_rooms: 2000.0,
            total_bedrooms: 400.0,
            population: 1000.0,
            households: 300.0,
            median_income: 5.0,
            ocean_proximity: OceanProximity::BASE,
        }
    }
}

/// Encoded features in model column order.
///
/// Only built by [`FeatureEncoder::encode`], so the values always match
/// the schema width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    values: Vec<f64>,
    schema: FeatureSchema,
}

impl FeatureVector {
    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vector holds no features
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Layout the values were encoded with
    pub fn schema(&self) -> FeatureSchema {
        self.schema
    }

    /// Look up a value by column name
    pub fn get(&self, column: &str) -> Option<f64> {
        self.schema
            .position(column)
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// Indicator columns only
    pub fn indicators(&self) -> &[f64] {
        self.values
            .get(self.schema.indicator_offset()..)
            .unwrap_or(&[])
    }

    /// Pairs of column name and value
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.schema.columns().into_iter().zip(self.values.iter().copied())
    }
}

/// Encodes raw attributes according to a fixed schema
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
}

impl FeatureEncoder {
    /// Create a new encoder
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    /// Schema used by this encoder
    pub fn schema(&self) -> FeatureSchema {
        self.schema
    }

    /// Encode one row
    pub fn encode(&self, input: &HousingInput) -> FeatureVector {
        let mut values = Vec::with_capacity(self.schema.width());

        values.push(input.longitude);
        values.push(input.latitude);
        values.push(input.housing_median_age);
        values.push(input.total_rooms);
        values.push(input.total_bedrooms);
        values.push(input.population);
        values.push(input.households);
        values.push(self.schema.income_units.to_deciles(input.median_income));
        debug_assert_eq!(values.len(), BASE_NUMERIC_COLUMNS.len());

        if self.schema.derived_ratios {
            values.push(per_household(input.total_rooms, input.households));
            values.push(per_household(input.total_bedrooms, input.households));
            values.push(per_household(input.population, input.households));
        }

        values.extend_from_slice(&input.ocean_proximity.indicators());

        debug!(
            "Encoded {} features (ocean_proximity={}, derived_ratios={})",
            values.len(),
            input.ocean_proximity,
            self.schema.derived_ratios
        );

        FeatureVector {
            values,
            schema: self.schema,
        }
    }
}

// Zero households would give inf/NaN; the model never saw either.
fn per_household(total: f64, households: f64) -> f64 {
    if households == 0.0 {
        0.0
    } else {
        total / households
    }
}
