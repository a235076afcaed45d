//! ONNX Regressor using tract

use crate::model::Regressor;
use crate::InferenceError;
use std::path::Path;
use tracing::info;
use tract_onnx::prelude::*;

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Regression graph exported to ONNX with a single `[1, n]` float input
pub struct OnnxRegressor {
    plan: OnnxPlan,
    n_features: usize,
}

impl OnnxRegressor {
    /// Load and optimize the graph for a fixed input width
    pub fn load(path: &Path, n_features: usize) -> Result<Self, InferenceError> {
        if !path.is_file() {
            return Err(InferenceError::ArtifactNotFound(path.to_path_buf()));
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, n_features]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {e}", path.display())))?;

        info!(
            "Loaded ONNX model {} ({} input columns)",
            path.display(),
            n_features
        );
        Ok(Self { plan, n_features })
    }
}

impl Regressor for OnnxRegressor {
    fn kind(&self) -> &'static str {
        "onnx"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.n_features {
            return Err(InferenceError::InvalidInputShape {
                expected: self.n_features,
                actual: features.len(),
            });
        }

        let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = Tensor::from_shape(&[1, self.n_features], &row)
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let first = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no outputs".into()))?;
        let values = first
            .cast_to::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
        let slice = values
            .as_slice::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        slice
            .first()
            .map(|&v| v as f64)
            .ok_or_else(|| InferenceError::InferenceFailed("model output is empty".into()))
    }
}
