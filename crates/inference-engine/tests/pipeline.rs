//! End-to-end estimates against JSON fixture artifacts

use feature_engine::{FeatureEncoder, FeatureSchema, HousingInput, OceanProximity};
use inference_engine::{ArtifactConfig, InferenceEngine, InferenceError};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn config(model: &str, scaler: Option<&str>) -> ArtifactConfig {
    ArtifactConfig {
        model_path: fixture(model),
        scaler_path: scaler.map(fixture),
    }
}

fn scenario(ocean_proximity: OceanProximity) -> HousingInput {
    HousingInput {
        longitude: -118.0,
        latitude: 34.0,
        housing_median_age: 15.0,
        total_rooms: 2000.0,
        total_bedrooms: 400.0,
        population: 1000.0,
        households: 300.0,
        median_income: 5.0,
        ocean_proximity,
    }
}

fn estimate(engine: &InferenceEngine, input: &HousingInput) -> f64 {
    let features = FeatureEncoder::new(engine.schema()).encode(input);
    engine.estimate(&features).unwrap().price
}

#[test]
fn test_separate_model_and_scaler() {
    let engine = InferenceEngine::load(
        &config("housing_model.json", Some("housing_scaler.json")),
        FeatureSchema::default(),
    )
    .unwrap();

    assert!(engine.has_scaler());
    assert_eq!(engine.model_kind(), "linear_regression");

    let cases = [
        (OceanProximity::LessThanOneHour, 238_960.0),
        (OceanProximity::Inland, 178_960.0),
        (OceanProximity::Island, 388_960.0),
        (OceanProximity::NearBay, 248_960.0),
        (OceanProximity::NearOcean, 258_960.0),
    ];
    for (category, expected) in cases {
        let price = estimate(&engine, &scenario(category));
        assert!(
            (price - expected).abs() < 1e-6,
            "{category}: got {price}, expected {expected}"
        );
    }
}

#[test]
fn test_combined_pipeline_matches_separate_files() {
    let schema = FeatureSchema::default();
    let separate =
        InferenceEngine::load(&config("housing_model.json", Some("housing_scaler.json")), schema)
            .unwrap();
    let combined = InferenceEngine::load(&config("housing_pipeline.json", None), schema).unwrap();

    assert!(combined.has_scaler());
    for category in OceanProximity::ALL {
        let input = scenario(category);
        assert_eq!(estimate(&separate, &input), estimate(&combined, &input));
    }
}

#[test]
fn test_onnx_graph_matches_json_model() {
    let schema = FeatureSchema::default();
    let json =
        InferenceEngine::load(&config("housing_model.json", Some("housing_scaler.json")), schema)
            .unwrap();
    let onnx =
        InferenceEngine::load(&config("housing_linear.onnx", Some("housing_scaler.json")), schema)
            .unwrap();

    assert_eq!(onnx.model_kind(), "onnx");
    assert!(onnx.has_scaler());

    // the graph computes in f32
    for category in OceanProximity::ALL {
        let input = scenario(category);
        let expected = estimate(&json, &input);
        let price = estimate(&onnx, &input);
        assert!(
            (price - expected).abs() < 0.5,
            "{category}: onnx {price}, json {expected}"
        );
    }
}

#[test]
fn test_repeated_estimates_are_identical() {
    let engine = InferenceEngine::load(
        &config("housing_model.json", Some("housing_scaler.json")),
        FeatureSchema::default(),
    )
    .unwrap();
    let features = FeatureEncoder::default().encode(&scenario(OceanProximity::Inland));

    let first = engine.estimate(&features).unwrap();
    for _ in 0..100 {
        assert_eq!(engine.estimate(&features).unwrap().price, first.price);
    }
    assert_eq!(first.to_string(), "$178,960.00 USD");
}

#[test]
fn test_tree_ensemble_without_scaler() {
    let engine =
        InferenceEngine::load(&config("housing_gbt.json", None), FeatureSchema::default())
            .unwrap();
    assert!(!engine.has_scaler());

    assert_eq!(estimate(&engine, &scenario(OceanProximity::Inland)), 155_000.0);
    assert_eq!(estimate(&engine, &scenario(OceanProximity::NearBay)), 305_000.0);

    let low_income = HousingInput {
        median_income: 2.0,
        ..scenario(OceanProximity::Inland)
    };
    assert_eq!(estimate(&engine, &low_income), 105_000.0);
}

#[test]
fn test_missing_model_is_fatal() {
    let err = InferenceEngine::load(&config("no_such_model.json", None), FeatureSchema::default())
        .unwrap_err();
    assert!(matches!(err, InferenceError::ArtifactNotFound(_)));
}

#[test]
fn test_missing_scaler_is_fatal() {
    let err = InferenceEngine::load(
        &config("housing_model.json", Some("no_such_scaler.json")),
        FeatureSchema::default(),
    )
    .unwrap_err();
    assert!(matches!(err, InferenceError::ArtifactNotFound(_)));
}

#[test]
fn test_truncated_artifact_is_fatal() {
    let err = InferenceEngine::load(&config("truncated_model.json", None), FeatureSchema::default())
        .unwrap_err();
    assert!(matches!(err, InferenceError::InvalidArtifact { .. }));
}

#[test]
fn test_swapped_columns_rejected_at_load() {
    let err = InferenceEngine::load(
        &config("housing_model_swapped.json", Some("housing_scaler.json")),
        FeatureSchema::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        InferenceError::SchemaMismatch { position: 9, .. }
    ));
}

#[test]
fn test_scaler_file_as_model_rejected() {
    let err = InferenceEngine::load(&config("housing_scaler.json", None), FeatureSchema::default())
        .unwrap_err();
    assert!(matches!(err, InferenceError::InvalidArtifact { .. }));
}

#[test]
fn test_shared_engine_is_single_assignment() {
    let schema = FeatureSchema::default();
    let first = InferenceEngine::init_shared(&config("housing_gbt.json", None), schema).unwrap();
    let second =
        InferenceEngine::init_shared(&config("housing_pipeline.json", None), schema).unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(second.model_kind(), "tree_ensemble");
    let shared = InferenceEngine::shared().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &shared));
}
