//! Integration test: Full pipeline (normalize → load bundle → predict)

use ndarray::{Array1, Array2};
use serde_json::json;

use exoplanet_server::adapter::{self, MODEL_INPUT_WIDTH};
use exoplanet_server::cli::cmd_predict;
use exoplanet_server::model::{
    Classifier, ModelBundle, ModelHandle, PerformanceReport, SoftmaxClassifier,
};
use exoplanet_server::normalizer::normalize;
use exoplanet_server::schema::FEATURE_NAMES;
use exoplanet_server::PipelineError;

fn softmax_bundle(winner: usize) -> ModelBundle {
    let mut intercepts = Array1::zeros(3);
    intercepts[winner] = 4.0;
    ModelBundle {
        best_model: Classifier::Softmax(SoftmaxClassifier {
            weights: Array2::zeros((3, MODEL_INPUT_WIDTH)),
            intercepts,
        }),
        class_names: vec![
            "CANDIDATE".to_string(),
            "CONFIRMED".to_string(),
            "FALSE POSITIVE".to_string(),
        ],
        performance_metrics: PerformanceReport {
            test_accuracy: 0.91234,
            test_f1: 0.88888,
            cv_mean: 0.90125,
        },
    }
}

/// A named record and its positional twin in canonical order
fn paired_records() -> (serde_json::Value, serde_json::Value) {
    let values: Vec<f64> = (1..=13).map(|i| i as f64 * 1.5).collect();
    let mut named = serde_json::Map::new();
    named.insert("name".to_string(), json!("HD 209458 b"));
    for (key, value) in FEATURE_NAMES.iter().zip(&values) {
        named.insert(key.to_string(), json!(value));
    }
    (json!([named]), json!([values]))
}

#[test]
fn test_named_and_positional_round_trip() {
    let (named, positional) = paired_records();
    let a = normalize(&named).unwrap();
    let b = normalize(&positional).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.dim(), (1, 13));
}

#[test]
fn test_pipeline_end_to_end_through_saved_bundle() {
    let path = std::env::temp_dir().join("exoplanet-test-pipeline-bundle.json");
    softmax_bundle(1).save(&path).unwrap();
    let bundle = ModelBundle::load(&path).unwrap();

    let (named, _) = paired_records();
    let matrix = normalize(&named).unwrap();
    let (result, metrics) = adapter::predict(&bundle, &matrix, &named).unwrap();

    assert_eq!(result.prediction, "CONFIRMED");
    assert_eq!(result.habitable, "Yes");
    assert_eq!(result.name, "HD 209458 b");
    assert!(result.confidence > 0.0);
    assert_eq!(metrics.test_accuracy, 0.912);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_model_errors_distinguish_missing_from_corrupt() {
    let missing = ModelBundle::load(std::path::Path::new("/nonexistent/bundle.json"));
    assert!(matches!(missing, Err(PipelineError::ModelNotFound(_))));

    let path = std::env::temp_dir().join("exoplanet-test-pipeline-corrupt.json");
    std::fs::write(&path, b"][").unwrap();
    let corrupt = ModelBundle::load(&path);
    assert!(matches!(corrupt, Err(PipelineError::ModelCorrupt(_))));
    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_handle_swap_visible_to_new_readers() {
    let handle = ModelHandle::new("/nonexistent/bundle.json");
    handle.replace(softmax_bundle(0)).await;

    let before = handle.snapshot().await.unwrap();
    handle.replace(softmax_bundle(2)).await;
    let after = handle.snapshot().await.unwrap();

    // Old snapshot still scores with the old winner; new readers see the swap.
    let (named, _) = paired_records();
    let matrix = normalize(&named).unwrap();
    let (old_result, _) = adapter::predict(&before, &matrix, &named).unwrap();
    let (new_result, _) = adapter::predict(&after, &matrix, &named).unwrap();
    assert_eq!(old_result.prediction, "CANDIDATE");
    assert_eq!(new_result.prediction, "FALSE POSITIVE");
}

#[test]
fn test_cli_predict_writes_response_file() {
    let model_path = std::env::temp_dir().join("exoplanet-test-cli-bundle.json");
    let data_path = std::env::temp_dir().join("exoplanet-test-cli-records.json");
    let out_path = std::env::temp_dir().join("exoplanet-test-cli-output.json");

    softmax_bundle(1).save(&model_path).unwrap();
    let (named, _) = paired_records();
    std::fs::write(&data_path, serde_json::to_string(&named).unwrap()).unwrap();

    cmd_predict(&model_path, &data_path, Some(&out_path)).unwrap();

    let response: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(response["success"], true);
    assert_eq!(response["results"][0]["prediction"], "CONFIRMED");
    assert_eq!(response["metrics"]["cv_mean"], 0.901);

    for path in [&model_path, &data_path, &out_path] {
        std::fs::remove_file(path).ok();
    }
}
