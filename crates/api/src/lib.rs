//! Housing Estimator API Server
//!
//! HTTP surface for the price estimator: one estimate endpoint plus
//! schema, health and metrics.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use data_validator::Validator;
use feature_engine::FeatureEncoder;
use inference_engine::InferenceEngine;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod error;
pub mod rate_limit;
mod routes;

pub use crate::config::{AppConfig, LoggingConfig};
pub use error::ApiError;
pub use rate_limit::RateLimitConfig;
pub use routes::estimate::{EstimateRequest, EstimateResponse};

/// Application state shared across handlers
pub struct AppState {
    /// Loaded artifacts, immutable for the process lifetime
    pub engine: Arc<InferenceEngine>,
    /// Encoder matching the engine's schema
    pub encoder: FeatureEncoder,
    /// Form-bound checks, `None` when disabled
    pub validator: Option<Validator>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Successful estimates served
    pub estimates: AtomicU64,
    /// Prometheus renderer, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state around a loaded engine
    pub fn new(engine: Arc<InferenceEngine>, validate: bool) -> Self {
        Self {
            encoder: FeatureEncoder::new(engine.schema()),
            engine,
            validator: validate.then(Validator::default),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            estimates: AtomicU64::new(0),
            metrics: None,
        }
    }

    /// Load the shared engine from configuration.
    ///
    /// Fails when artifacts are missing or do not match the schema; no
    /// state exists to serve requests with in that case.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let engine = InferenceEngine::init_shared(&config.artifacts, config.features)
            .map_err(ApiError::Startup)?;
        Ok(Self::new(engine, config.validation.enabled))
    }

    /// Attach a Prometheus handle for the metrics route
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelHealth,
    pub estimate_count: u64,
}

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub kind: String,
    pub scaled: bool,
    pub columns: usize,
}

/// Create the application router
pub fn create_router(
    state: Arc<AppState>,
    limits: &RateLimitConfig,
) -> Result<Router, ApiError> {
    let mut estimate =
        Router::new().route("/api/v1/estimate", post(routes::estimate::post_estimate));
    if limits.enabled {
        let config = rate_limit::create_governor_config(limits)?;
        estimate = estimate.layer(GovernorLayer { config });
    }

    Ok(Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/schema", get(routes::schema::get_schema))
        .route("/metrics", get(metrics_handler))
        .merge(estimate)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelHealth {
            kind: state.engine.model_kind().to_string(),
            scaled: state.engine.has_scaler(),
            columns: state.engine.schema().width(),
        },
        estimate_count: state.estimates.load(Ordering::Relaxed),
    })
}

/// Prometheus scrape handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|e| ApiError::Logging(format!("{}: {:?}", e, config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| ApiError::Logging(e.to_string()))
}

/// Load artifacts and run the server until it stops.
///
/// Artifact failures return before the listener is bound.
pub async fn run_server(config: AppConfig) -> Result<(), ApiError> {
    let state = AppState::from_config(&config)?;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Metrics(e.to_string()))?;
    let state = Arc::new(state.with_metrics(handle));

    let app = create_router(state, &config.rate_limit)?;

    info!("Starting API server on {}", config.server.addr);

    let listener = tokio::net::TcpListener::bind(&config.server.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
