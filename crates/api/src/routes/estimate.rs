//! Estimate Route

use axum::{extract::State, Json};
use feature_engine::{EncodingError, HousingInput, OceanProximity};
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::AppState;

/// Form submission
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub housing_median_age: f64,
    pub total_rooms: f64,
    pub total_bedrooms: f64,
    pub population: f64,
    pub households: f64,
    pub median_income: f64,
    pub ocean_proximity: String,
}

impl EstimateRequest {
    /// Resolve the category label into a typed input
    pub fn into_input(self) -> Result<HousingInput, EncodingError> {
        Ok(HousingInput {
            longitude: self.longitude,
            latitude: self.latitude,
            housing_median_age: self.housing_median_age,
            total_rooms: self.total_rooms,
            total_bedrooms: self.total_bedrooms,
            population: self.population,
            households: self.households,
            median_income: self.median_income,
            ocean_proximity: OceanProximity::parse(&self.ocean_proximity)?,
        })
    }
}

/// Estimated price
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub price: f64,
    pub formatted: String,
    pub latency_us: u64,
}

/// Estimate a price from form inputs
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let input = request.into_input().inspect_err(|e| {
        debug!("Rejected estimate request: {}", e);
        counter!("housing_estimate_errors_total", "reason" => "encoding").increment(1);
    })?;

    if let Some(validator) = &state.validator {
        let result = validator.validate(&input, &state.encoder.schema());
        if !result.valid {
            counter!("housing_estimate_errors_total", "reason" => "validation").increment(1);
            return Err(ApiError::Validation(result.errors));
        }
    }

    let features = state.encoder.encode(&input);
    let estimate = state.engine.estimate(&features).map_err(|e| {
        warn!("Estimate failed: {}", e);
        counter!("housing_estimate_errors_total", "reason" => "inference").increment(1);
        ApiError::Calculation(e)
    })?;

    state.estimates.fetch_add(1, Ordering::Relaxed);
    counter!("housing_estimates_total").increment(1);
    histogram!("housing_estimate_latency_us").record(estimate.latency_us as f64);

    Ok(Json(EstimateResponse {
        price: estimate.price,
        formatted: estimate.to_string(),
        latency_us: estimate.latency_us,
    }))
}
