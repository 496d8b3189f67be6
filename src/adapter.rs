//! Inference adapter: bridges normalized requests to the classifier bundle
//!
//! Pads the observable feature vector to the deployed model's input width,
//! runs point prediction plus capability-gated probability scoring, and
//! shapes the labeled result.

use ndarray::Array2;
use serde::Serialize;
use serde_json::Value;

use crate::error::{PipelineError, Result};
use crate::model::ModelBundle;
use crate::schema::REQUIRED_FEATURES;

/// Input width of the deployed classifier family.
///
/// The public schema exposes 13 observable features, but the deployed models
/// are trained on an 18-wide layout. The trailing features are always zero
/// here; they are not parameters the caller can influence.
pub const MODEL_INPUT_WIDTH: usize = 18;

/// Label of the confirmed-planet category; drives the habitability flag.
pub const CONFIRMED_LABEL: &str = "CONFIRMED";

/// Name attached to a result when the scored record carries none.
pub const DEFAULT_RECORD_NAME: &str = "Planet";

/// One scored observation
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub name: String,
    pub prediction: String,
    pub confidence: f64,
    pub features: Value,
    pub habitable: String,
}

/// Bundle-level performance figures, rounded for presentation
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub test_accuracy: f64,
    pub test_f1: f64,
    pub cv_mean: f64,
}

/// Score the first record of a normalized batch against the bundle.
///
/// The wire contract accepts up to the batch limit but only `data[0]` is
/// scored; the remaining rows are validated and discarded. Kept as the
/// documented service behavior rather than silently scoring the whole batch.
pub fn predict(
    bundle: &ModelBundle,
    matrix: &Array2<f64>,
    records: &Value,
) -> Result<(PredictionResult, MetricsSummary)> {
    if matrix.ncols() != REQUIRED_FEATURES {
        return Err(PipelineError::Shape {
            expected: format!("{REQUIRED_FEATURES} features"),
            actual: format!("{} features", matrix.ncols()),
        });
    }
    let first = matrix
        .rows()
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::Inference("normalized batch is empty".to_string()))?;

    let mut row = first.to_vec();
    row.resize(MODEL_INPUT_WIDTH, 0.0);
    let x = Array2::from_shape_vec((1, MODEL_INPUT_WIDTH), row)?;

    let model = &bundle.best_model;
    let class_index = model
        .predict(&x)?
        .first()
        .copied()
        .ok_or_else(|| PipelineError::Inference("classifier returned no prediction".to_string()))?;

    let label = bundle.class_names.get(class_index).ok_or_else(|| {
        PipelineError::Inference(format!(
            "predicted class index {class_index} is outside the label table ({} classes)",
            bundle.class_names.len()
        ))
    })?;

    // Capability check, not invoke-and-catch: a classifier without
    // probability scoring yields zero confidence, while a scoring failure on
    // a capable classifier surfaces as a real error.
    let confidence = if model.supports_probability() {
        let proba = model.predict_proba(&x)?;
        let best = proba
            .row(0)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        round_to(best * 100.0, 2)
    } else {
        0.0
    };

    let scored = records.get(0);
    let name = scored
        .and_then(|r| r.get("name"))
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_RECORD_NAME)
        .to_string();

    let result = PredictionResult {
        name,
        prediction: label.clone(),
        confidence,
        features: scored.cloned().unwrap_or(Value::Null),
        habitable: if label == CONFIRMED_LABEL { "Yes" } else { "No" }.to_string(),
    };

    let report = &bundle.performance_metrics;
    let metrics = MetricsSummary {
        test_accuracy: round_to(report.test_accuracy, 3),
        test_f1: round_to(report.test_f1, 3),
        cv_mean: round_to(report.cv_mean, 3),
    };

    Ok((result, metrics))
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
