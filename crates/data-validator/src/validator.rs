//! Data Validator for Range Checking

use crate::error::ValidationError;
use feature_engine::{FeatureSchema, HousingInput, IncomeUnits};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Longitude valid range (degrees)
    pub longitude_range: (f64, f64),
    /// Latitude valid range (degrees)
    pub latitude_range: (f64, f64),
    /// Housing median age valid range (years)
    pub age_range: (f64, f64),
    /// Median income range in $10,000 units
    pub income_decile_range: (f64, f64),
    /// Median income range in annual dollars
    pub income_annual_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            longitude_range: (-124.35, -114.31),
            latitude_range: (32.54, 41.95),
            age_range: (1.0, 52.0),
            income_decile_range: (0.5, 15.0),
            income_annual_range: (10_000.0, 150_000.0),
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for raw housing attributes
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate a count, which has no upper bound
    pub fn validate_count(&self, field: &'static str, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            Err(ValidationError::NotFinite { field })
        } else if value < 0.0 {
            Err(ValidationError::Negative { field, value })
        } else {
            Ok(())
        }
    }

    /// Validate median income in the given units
    pub fn validate_income(&self, value: f64, units: IncomeUnits) -> Result<(), ValidationError> {
        let range = match units {
            IncomeUnits::Deciles => self.config.income_decile_range,
            IncomeUnits::AnnualUsd => self.config.income_annual_range,
        };
        self.validate_range("median_income", value, range)
    }

    /// Validate every field, collecting all violations
    pub fn validate(&self, input: &HousingInput, schema: &FeatureSchema) -> ValidationResult {
        let checks = [
            self.validate_range("longitude", input.longitude, self.config.longitude_range),
            self.validate_range("latitude", input.latitude, self.config.latitude_range),
            self.validate_range(
                "housing_median_age",
                input.housing_median_age,
                self.config.age_range,
            ),
            self.validate_count("total_rooms", input.total_rooms),
            self.validate_count("total_bedrooms", input.total_bedrooms),
            self.validate_count("population", input.population),
            self.validate_count("households", input.households),
            self.validate_income(input.median_income, schema.income_units),
        ];
        let fields_checked = checks.len();

        let mut errors: Vec<ValidationError> =
            checks.into_iter().filter_map(Result::err).collect();

        if schema.derived_ratios && input.households == 0.0 {
            errors.push(ValidationError::NoHouseholds);
        }

        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            debug!("Input rejected with {} violations", errors.len());
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_form_defaults_are_valid() {
        let validator = Validator::default();
        let result = validator.validate(&HousingInput::default(), &FeatureSchema::default());
        assert!(result.valid);
        assert_eq!(result.fields_checked, 8);
    }

    #[test]
    fn test_longitude_bounds() {
        let validator = Validator::default();
        let range = validator.config.longitude_range;
        assert!(validator.validate_range("longitude", -124.35, range).is_ok());
        assert!(validator.validate_range("longitude", -114.31, range).is_ok());
        assert!(validator.validate_range("longitude", -130.0, range).is_err());
        assert!(validator.validate_range("longitude", 0.0, range).is_err());
    }

    #[test]
    fn test_income_units() {
        let validator = Validator::default();
        assert!(validator.validate_income(5.0, IncomeUnits::Deciles).is_ok());
        assert!(validator.validate_income(50_000.0, IncomeUnits::Deciles).is_err());
        assert!(validator.validate_income(50_000.0, IncomeUnits::AnnualUsd).is_ok());
        assert!(validator.validate_income(5.0, IncomeUnits::AnnualUsd).is_err());
    }

    #[test]
    fn test_collects_all_violations() {
        let validator = Validator::default();
        let input = HousingInput {
            latitude: 50.0,
            total_rooms: -1.0,
            population: f64::NAN,
            ..HousingInput::default()
        };
        let result = validator.validate(&input, &FeatureSchema::default());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors.contains(&ValidationError::Negative {
            field: "total_rooms",
            value: -1.0
        }));
        assert!(result
            .errors
            .contains(&ValidationError::NotFinite { field: "population" }));
    }

    #[test]
    fn test_zero_households_with_ratios() {
        let validator = Validator::default();
        let input = HousingInput {
            households: 0.0,
            ..HousingInput::default()
        };
        assert!(validator.validate(&input, &FeatureSchema::default()).valid);

        let schema = FeatureSchema::new(IncomeUnits::Deciles, true);
        let result = validator.validate(&input, &schema);
        assert_eq!(result.errors, vec![ValidationError::NoHouseholds]);
    }

    proptest! {
        #[test]
        fn prop_in_bounds_inputs_pass(
            lon in -124.35f64..=-114.31,
            lat in 32.54f64..=41.95,
            age in 1u32..=52,
            income in 0.5f64..=15.0,
        ) {
            let input = HousingInput {
                longitude: lon,
                latitude: lat,
                housing_median_age: age as f64,
                median_income: income,
                ..HousingInput::default()
            };
            let result = Validator::default().validate(&input, &FeatureSchema::default());
            prop_assert!(result.valid, "{:?}", result.errors);
        }
    }
}
