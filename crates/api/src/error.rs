//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use feature_engine::EncodingError;
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;

/// Errors from startup and request handling
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    /// Artifacts could not be loaded; the estimator cannot serve requests
    #[error("Startup failed: {0}")]
    Startup(InferenceError),
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Rate limiter setup failed: {0}")]
    RateLimit(String),
    #[error("Metrics setup failed: {0}")]
    Metrics(String),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {} violation(s)", .0.len())]
    Validation(Vec<ValidationError>),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("Calculation error: check the feature columns. Detail: {0}")]
    Calculation(InferenceError),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ValidationError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::Encoding(_) => StatusCode::BAD_REQUEST,
            ApiError::Calculation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let violations = match &self {
            ApiError::Validation(errors) => errors.clone(),
            _ => Vec::new(),
        };

        let body = ErrorBody {
            error: self.to_string(),
            violations,
        };

        (status, Json(body)).into_response()
    }
}
