//! Ocean Proximity Category

use crate::EncodingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of indicator columns (five categories, base dropped)
pub const INDICATOR_COUNT: usize = 4;

/// Proximity of a block group to the ocean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OceanProximity {
    /// Less than one hour from the ocean (base category)
    #[serde(rename = "<1H OCEAN")]
    LessThanOneHour,
    #[serde(rename = "INLAND")]
    Inland,
    #[serde(rename = "ISLAND")]
    Island,
    #[serde(rename = "NEAR BAY")]
    NearBay,
    #[serde(rename = "NEAR OCEAN")]
    NearOcean,
}

impl OceanProximity {
    /// All categories in vocabulary order
    pub const ALL: [OceanProximity; 5] = [
        OceanProximity::LessThanOneHour,
        OceanProximity::Inland,
        OceanProximity::Island,
        OceanProximity::NearBay,
        OceanProximity::NearOcean,
    ];

    /// Category represented by all-zero indicators
    pub const BASE: OceanProximity = OceanProximity::LessThanOneHour;

    /// Get string representation as used in the training data
    pub fn as_str(&self) -> &'static str {
        match self {
            OceanProximity::LessThanOneHour => "<1H OCEAN",
            OceanProximity::Inland => "INLAND",
            OceanProximity::Island => "ISLAND",
            OceanProximity::NearBay => "NEAR BAY",
            OceanProximity::NearOcean => "NEAR OCEAN",
        }
    }

    /// Parse a category label. Surrounding whitespace and case are ignored.
    pub fn parse(label: &str) -> Result<Self, EncodingError> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EncodingError::UnknownCategory(label.to_string()))
    }

    /// Position of this category's indicator column, `None` for the base
    pub fn indicator_index(&self) -> Option<usize> {
        match self {
            OceanProximity::LessThanOneHour => None,
            OceanProximity::Inland => Some(0),
            OceanProximity::Island => Some(1),
            OceanProximity::NearBay => Some(2),
            OceanProximity::NearOcean => Some(3),
        }
    }

    /// Drop-first one-hot indicators
    pub fn indicators(&self) -> [f64; INDICATOR_COUNT] {
        let mut out = [0.0; INDICATOR_COUNT];
        if let Some(idx) = self.indicator_index() {
            out[idx] = 1.0;
        }
        out
    }
}

impl Default for OceanProximity {
    fn default() -> Self {
        Self::BASE
    }
}

impl fmt::Display for OceanProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OceanProximity {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_category_is_all_zero() {
        assert_eq!(OceanProximity::BASE.indicators(), [0.0; INDICATOR_COUNT]);
        assert_eq!(OceanProximity::BASE.indicator_index(), None);
    }

    #[test]
    fn test_each_category_has_single_encoding() {
        for category in OceanProximity::ALL {
            let indicators = category.indicators();
            let hot = indicators.iter().filter(|&&v| v == 1.0).count();
            let cold = indicators.iter().filter(|&&v| v == 0.0).count();
            assert_eq!(hot + cold, INDICATOR_COUNT);

            match category.indicator_index() {
                None => assert_eq!(hot, 0),
                Some(idx) => {
                    assert_eq!(hot, 1);
                    assert_eq!(indicators[idx], 1.0);
                }
            }
        }
    }

    #[test]
    fn test_indicator_positions_are_distinct() {
        let mut seen: Vec<usize> = OceanProximity::ALL
            .iter()
            .filter_map(|c| c.indicator_index())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(OceanProximity::parse("INLAND").unwrap(), OceanProximity::Inland);
        assert_eq!(OceanProximity::parse(" near bay ").unwrap(), OceanProximity::NearBay);
        assert_eq!(
            "<1H OCEAN".parse::<OceanProximity>().unwrap(),
            OceanProximity::LessThanOneHour
        );
        assert!(matches!(
            OceanProximity::parse("DESERT"),
            Err(EncodingError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_serde_uses_training_labels() {
        let json = serde_json::to_string(&OceanProximity::NearOcean).unwrap();
        assert_eq!(json, "\"NEAR OCEAN\"");
        let back: OceanProximity = serde_json::from_str("\"<1H OCEAN\"").unwrap();
        assert_eq!(back, OceanProximity::LessThanOneHour);
    }
}
