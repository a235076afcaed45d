//! Application Configuration
//!
//! Layered as built-in defaults, then an optional TOML file, then
//! `HOUSING__SECTION__KEY` environment variables.

use crate::error::ApiError;
use crate::rate_limit::RateLimitConfig;
use config::{Config, Environment, File};
use feature_engine::FeatureSchema;
use inference_engine::ArtifactConfig;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "housing.toml";

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:7860".to_string(),
        }
    }
}

/// Whether form bounds are enforced server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSettings {
    pub enabled: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactConfig,
    pub features: FeatureSchema,
    pub validation: ValidationSettings,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// With `path` set the file must exist; otherwise `housing.toml` is
    /// read if present.
    pub fn load(path: Option<&str>) -> Result<Self, ApiError> {
        let defaults = Config::try_from(&AppConfig::default())?;

        let mut config: AppConfig = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_FILE)).required(path.is_some()))
            .add_source(
                Environment::with_prefix("HOUSING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        // An empty scaler path means the model runs on unscaled features.
        if config
            .artifacts
            .scaler_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            config.artifacts.scaler_path = None;
        }

        Ok(config)
    }
}
