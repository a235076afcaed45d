//! Encode-and-estimate latency

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::{FeatureEncoder, FeatureSchema, HousingInput, OceanProximity};
use inference_engine::{ArtifactConfig, InferenceEngine};
use std::path::Path;

fn bench_estimate(c: &mut Criterion) {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let schema = FeatureSchema::default();
    let encoder = FeatureEncoder::new(schema);
    let input = HousingInput {
        ocean_proximity: OceanProximity::Inland,
        ..HousingInput::default()
    };

    let linear = InferenceEngine::load(
        &ArtifactConfig {
            model_path: fixtures.join("housing_model.json"),
            scaler_path: Some(fixtures.join("housing_scaler.json")),
        },
        schema,
    )
    .expect("linear fixture loads");

    let trees = InferenceEngine::load(
        &ArtifactConfig {
            model_path: fixtures.join("housing_gbt.json"),
            scaler_path: None,
        },
        schema,
    )
    .expect("tree fixture loads");

    c.bench_function("encode", |b| b.iter(|| encoder.encode(black_box(&input))));

    c.bench_function("estimate_linear_scaled", |b| {
        b.iter(|| linear.estimate(&encoder.encode(black_box(&input))))
    });

    c.bench_function("estimate_tree_ensemble", |b| {
        b.iter(|| trees.estimate(&encoder.encode(black_box(&input))))
    });
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
