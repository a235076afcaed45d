//! Inference Engine Implementation

use crate::artifact::{is_onnx, read_artifact, ArtifactConfig};
use crate::model::Regressor;
use crate::onnx::OnnxRegressor;
use crate::scaler::StandardScaler;
use crate::InferenceError;
use feature_engine::{FeatureSchema, FeatureVector};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

static SHARED: OnceLock<Arc<InferenceEngine>> = OnceLock::new();

/// Result of a price estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Predicted price in dollars
    pub price: f64,
    /// Time spent scaling and predicting
    pub latency_us: u64,
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_usd(self.price))
    }
}

/// Format a dollar amount with thousands separators and cents: `$1,234.50 USD`
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };
    format!("${sign}{grouped}.{cents} USD")
}

/// Scaler and model, checked against one feature layout
pub struct InferenceEngine {
    schema: FeatureSchema,
    scaler: Option<StandardScaler>,
    model: Box<dyn Regressor>,
    model_path: PathBuf,
}

impl fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("schema", &self.schema)
            .field("model_kind", &self.model.kind())
            .field("has_scaler", &self.scaler.is_some())
            .field("model_path", &self.model_path)
            .finish()
    }
}

impl InferenceEngine {
    /// Load artifacts from disk and verify them against the schema
    pub fn load(config: &ArtifactConfig, schema: FeatureSchema) -> Result<Self, InferenceError> {
        info!(
            "Loading inference artifacts: model={}, scaler={:?}",
            config.model_path.display(),
            config.scaler_path
        );

        let (embedded_scaler, model) = if is_onnx(&config.model_path) {
            let model = OnnxRegressor::load(&config.model_path, schema.width())?;
            (None, Box::new(model) as Box<dyn Regressor>)
        } else {
            let (scaler, model) = read_artifact(&config.model_path)?.into_parts();
            let model = model.ok_or_else(|| InferenceError::InvalidArtifact {
                path: config.model_path.clone(),
                reason: "file holds a scaler, not a model".to_string(),
            })?;
            (scaler, model.into_regressor())
        };

        let scaler = match &config.scaler_path {
            Some(path) => {
                if embedded_scaler.is_some() {
                    warn!(
                        "Model pipeline embeds a scaler; ignoring {}",
                        path.display()
                    );
                    embedded_scaler
                } else {
                    Some(read_scaler(path)?)
                }
            }
            None => embedded_scaler,
        };

        let mut engine = Self::from_parts(schema, scaler, model)?;
        engine.model_path = config.model_path.clone();

        info!(
            "Inference engine ready: {} model, scaler={}, {} columns",
            engine.model.kind(),
            engine.scaler.is_some(),
            schema.width()
        );
        Ok(engine)
    }

    /// Build an engine from already-loaded parts
    pub fn from_parts(
        schema: FeatureSchema,
        scaler: Option<StandardScaler>,
        model: Box<dyn Regressor>,
    ) -> Result<Self, InferenceError> {
        if let Some(scaler) = &scaler {
            verify_columns(
                "scaler",
                scaler.feature_names.as_deref(),
                scaler.n_features(),
                &schema,
            )?;
        }
        verify_columns(model.kind(), model.feature_names(), model.n_features(), &schema)?;

        Ok(Self {
            schema,
            scaler,
            model,
            model_path: PathBuf::new(),
        })
    }

    /// Load once and keep for the rest of the process.
    ///
    /// Later calls return the engine from the first successful call and
    /// ignore their arguments.
    pub fn init_shared(
        config: &ArtifactConfig,
        schema: FeatureSchema,
    ) -> Result<Arc<Self>, InferenceError> {
        if let Some(engine) = SHARED.get() {
            return Ok(Arc::clone(engine));
        }
        let engine = Arc::new(Self::load(config, schema)?);
        Ok(Arc::clone(SHARED.get_or_init(|| engine)))
    }

    /// The process-wide engine, if initialized
    pub fn shared() -> Option<Arc<Self>> {
        SHARED.get().cloned()
    }

    /// Estimate the price for one encoded row
    pub fn estimate(&self, features: &FeatureVector) -> Result<Estimate, InferenceError> {
        let start = std::time::Instant::now();

        if features.len() != self.schema.width() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.schema.width(),
                actual: features.len(),
            });
        }
        if features.schema() != self.schema {
            return Err(InferenceError::IncompatibleEncoding {
                expected: self.schema,
                actual: features.schema(),
            });
        }

        let price = match &self.scaler {
            Some(scaler) => self.model.predict(&scaler.transform(features.as_slice())?)?,
            None => self.model.predict(features.as_slice())?,
        };

        if !price.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "model returned non-finite value {price}"
            )));
        }

        let latency_us = start.elapsed().as_micros() as u64;
        debug!("Estimate {} computed in {}us", format_usd(price), latency_us);

        Ok(Estimate { price, latency_us })
    }

    /// Feature layout the artifacts were checked against
    pub fn schema(&self) -> FeatureSchema {
        self.schema
    }

    /// Model family name
    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }

    /// Whether a scaling stage runs before the model
    pub fn has_scaler(&self) -> bool {
        self.scaler.is_some()
    }

    /// Path the model was loaded from (empty when built from parts)
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

fn read_scaler(path: &Path) -> Result<StandardScaler, InferenceError> {
    match read_artifact(path)?.into_parts() {
        (Some(scaler), None) => Ok(scaler),
        _ => Err(InferenceError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: "expected a standard_scaler artifact".to_string(),
        }),
    }
}

/// Compare an artifact's fitted columns with the encoder's layout
fn verify_columns(
    artifact: &str,
    names: Option<&[String]>,
    width: usize,
    schema: &FeatureSchema,
) -> Result<(), InferenceError> {
    if width != schema.width() {
        return Err(InferenceError::WidthMismatch {
            artifact: artifact.to_string(),
            expected: schema.width(),
            actual: width,
        });
    }

    let Some(names) = names else {
        debug!("{} carries no feature names; checked width only", artifact);
        return Ok(());
    };

    for (position, (expected, found)) in names.iter().zip(schema.columns()).enumerate() {
        if expected != found {
            return Err(InferenceError::SchemaMismatch {
                artifact: artifact.to_string(),
                position,
                expected: expected.clone(),
                found: found.to_string(),
            });
        }
    }
    Ok(())
}
