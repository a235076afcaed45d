//! Standard Scaler

use crate::InferenceError;
use serde::{Deserialize, Serialize};

/// Per-column standardization fitted at training time: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column names seen during fit, if recorded
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// Column means
    pub mean: Vec<f64>,
    /// Column standard deviations
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Number of columns the scaler was fit on
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Check internal consistency after deserialization
    pub fn check(&self) -> Result<(), String> {
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "scaler has {} means but {} scales",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(format!(
                    "scaler has {} feature names but {} columns",
                    names.len(),
                    self.mean.len()
                ));
            }
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err("scaler parameters must be finite".to_string());
        }
        Ok(())
    }

    /// Standardize one row
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if values.len() != self.n_features() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features(),
                actual: values.len(),
            });
        }

        Ok(values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant columns are fit with scale 0 and left unscaled.
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler {
            feature_names: None,
            mean: vec![10.0, 0.0, 5.0],
            scale: vec![2.0, 1.0, 0.0],
        }
    }

    #[test]
    fn test_transform() {
        let out = scaler().transform(&[14.0, -3.0, 7.0]).unwrap();
        assert_eq!(out, vec![2.0, -3.0, 2.0]);
    }

    #[test]
    fn test_transform_wrong_width() {
        let err = scaler().transform(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::InvalidInputShape { expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn test_check_rejects_mismatched_lengths() {
        let mut bad = scaler();
        bad.scale.pop();
        assert!(bad.check().is_err());

        let mut bad = scaler();
        bad.feature_names = Some(vec!["a".to_string()]);
        assert!(bad.check().is_err());

        assert!(scaler().check().is_ok());
    }
}
