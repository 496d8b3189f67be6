//! Classifier families packaged inside a model bundle
//!
//! A bundle's classifier is one of a closed set of serializable families.
//! Probability scoring is a capability: callers probe `supports_probability`
//! instead of invoking `predict_proba` blindly, so a genuine scoring failure
//! is never mistaken for an unsupported model.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// A trained classifier in one of the supported families
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Softmax(SoftmaxClassifier),
    NearestCentroid(NearestCentroidClassifier),
}

impl Classifier {
    /// Input width this classifier was trained on
    pub fn n_features(&self) -> usize {
        match self {
            Classifier::Softmax(m) => m.weights.ncols(),
            Classifier::NearestCentroid(m) => m.centroids.ncols(),
        }
    }

    /// Number of classes in the label space
    pub fn n_classes(&self) -> usize {
        match self {
            Classifier::Softmax(m) => m.weights.nrows(),
            Classifier::NearestCentroid(m) => m.centroids.nrows(),
        }
    }

    /// Whether this classifier produces probability scores
    pub fn supports_probability(&self) -> bool {
        matches!(self, Classifier::Softmax(_))
    }

    /// Point prediction: one class index per input row
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        self.check_width(x)?;
        match self {
            Classifier::Softmax(m) => Ok(m.predict(x)),
            Classifier::NearestCentroid(m) => Ok(m.predict(x)),
        }
    }

    /// Per-class probability scores, one row per input row
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(x)?;
        match self {
            Classifier::Softmax(m) => Ok(m.predict_proba(x)),
            Classifier::NearestCentroid(_) => Err(PipelineError::Inference(
                "nearest centroid classifier does not produce probability scores".to_string(),
            )),
        }
    }

    fn check_width(&self, x: &Array2<f64>) -> Result<()> {
        if x.ncols() != self.n_features() {
            return Err(PipelineError::Shape {
                expected: format!("{} features", self.n_features()),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok(())
    }
}

/// Linear classifier with a softmax head
///
/// `weights` is `(n_classes, n_features)`; `intercepts` has one entry per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    pub weights: Array2<f64>,
    pub intercepts: Array1<f64>,
}

impl SoftmaxClassifier {
    fn decision(&self, x: &Array2<f64>) -> Array2<f64> {
        x.dot(&self.weights.t()) + &self.intercepts
    }

    fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        self.decision(x)
            .rows()
            .into_iter()
            .map(|row| argmax(row.iter().copied()))
            .collect()
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut scores = self.decision(x);
        for mut row in scores.rows_mut() {
            // Shift by the row max before exponentiating to keep exp() bounded.
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            row.mapv_inplace(|v| (v - max).exp());
            let sum: f64 = row.iter().sum();
            row.mapv_inplace(|v| v / sum);
        }
        scores
    }
}

/// Nearest-centroid classifier: point prediction only, no probability scores
///
/// `centroids` is `(n_classes, n_features)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestCentroidClassifier {
    pub centroids: Array2<f64>,
}

impl NearestCentroidClassifier {
    fn predict(&self, x: &Array2<f64>) -> Vec<usize> {
        x.rows()
            .into_iter()
            .map(|row| {
                argmax(self.centroids.rows().into_iter().map(|centroid| {
                    -row.iter()
                        .zip(centroid.iter())
                        .map(|(a, b)| (a - b) * (a - b))
                        .sum::<f64>()
                }))
            })
            .collect()
    }
}

/// Index of the largest value; first occurrence wins on ties
fn argmax(values: impl Iterator<Item = f64>) -> usize {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best.0
}
