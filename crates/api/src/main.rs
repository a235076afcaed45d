//! Housing Estimator - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("HOUSING_CONFIG").ok();
    let config = AppConfig::load(config_path.as_deref()).context("loading configuration")?;

    init_logging(&config.logging).context("initializing logging")?;

    info!("=== Housing Estimator v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Model {} (scaler: {:?}), income in {}, derived ratios: {}",
        config.artifacts.model_path.display(),
        config.artifacts.scaler_path,
        config.features.income_units.as_str(),
        config.features.derived_ratios
    );

    if let Err(e) = run_server(config).await {
        error!("{}", e);
        return Err(e).context("housing estimator stopped");
    }

    Ok(())
}
