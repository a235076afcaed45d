//! Schema Route

use axum::{extract::State, Json};
use feature_engine::{IncomeUnits, OceanProximity};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Feature layout the running model expects
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub columns: Vec<&'static str>,
    pub categories: Vec<&'static str>,
    pub base_category: &'static str,
    pub income_units: IncomeUnits,
    pub derived_ratios: bool,
    pub model_kind: &'static str,
    pub scaled: bool,
}

/// Get the feature schema
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let schema = state.engine.schema();

    Json(SchemaResponse {
        columns: schema.columns(),
        categories: OceanProximity::ALL.iter().map(|c| c.as_str()).collect(),
        base_category: OceanProximity::BASE.as_str(),
        income_units: schema.income_units,
        derived_ratios: schema.derived_ratios,
        model_kind: state.engine.model_kind(),
        scaled: state.engine.has_scaler(),
    })
}
