//! Swappable handle for the active model bundle
//!
//! Readers take an `Arc` snapshot at the start of a request; replacement
//! assigns a fully constructed bundle under the write lock, so in-flight
//! predictions never observe a half-updated bundle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::error::Result;

use super::ModelBundle;

pub struct ModelHandle {
    path: PathBuf,
    active: RwLock<Option<Arc<ModelBundle>>>,
}

impl ModelHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            active: RwLock::new(None),
        }
    }

    /// Configured artifact path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the artifact from disk and make it the active bundle
    pub async fn load_from_disk(&self) -> Result<Arc<ModelBundle>> {
        let bundle = Arc::new(ModelBundle::load(&self.path)?);
        *self.active.write().await = Some(Arc::clone(&bundle));
        info!(
            path = %self.path.display(),
            classes = bundle.class_names.len(),
            "Model bundle loaded"
        );
        Ok(bundle)
    }

    /// Snapshot of the active bundle, if any
    pub async fn snapshot(&self) -> Option<Arc<ModelBundle>> {
        self.active.read().await.clone()
    }

    /// Active bundle, retrying a disk load when none is resident
    pub async fn acquire(&self) -> Result<Arc<ModelBundle>> {
        if let Some(bundle) = self.snapshot().await {
            return Ok(bundle);
        }
        self.load_from_disk().await
    }

    /// Atomically swap in a replacement bundle
    pub async fn replace(&self, bundle: ModelBundle) -> Arc<ModelBundle> {
        let bundle = Arc::new(bundle);
        *self.active.write().await = Some(Arc::clone(&bundle));
        info!(classes = bundle.class_names.len(), "Model bundle replaced");
        bundle
    }

    pub async fn is_loaded(&self) -> bool {
        self.active.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classifier, PerformanceReport, SoftmaxClassifier};
    use ndarray::{Array1, Array2};

    fn bundle_with_classes(classes: &[&str]) -> ModelBundle {
        ModelBundle {
            best_model: Classifier::Softmax(SoftmaxClassifier {
                weights: Array2::zeros((classes.len(), 18)),
                intercepts: Array1::zeros(classes.len()),
            }),
            class_names: classes.iter().map(|s| s.to_string()).collect(),
            performance_metrics: PerformanceReport {
                test_accuracy: 0.9,
                test_f1: 0.9,
                cv_mean: 0.9,
            },
        }
    }

    #[tokio::test]
    async fn test_handle_starts_empty() {
        let handle = ModelHandle::new("/nonexistent/model.json");
        assert!(!handle.is_loaded().await);
        assert!(handle.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_acquire_retries_load_and_reports_missing() {
        let handle = ModelHandle::new("/nonexistent/model.json");
        let err = handle.acquire().await.unwrap_err();
        assert!(matches!(err, crate::error::PipelineError::ModelNotFound(_)));
        // Still not loaded; a later attempt retries again.
        assert!(!handle.is_loaded().await);
    }

    #[tokio::test]
    async fn test_acquire_after_disk_load() {
        let path = std::env::temp_dir().join("exoplanet-test-handle-load.json");
        bundle_with_classes(&["A", "B"]).save(&path).unwrap();

        let handle = ModelHandle::new(&path);
        let bundle = handle.acquire().await.unwrap();
        assert_eq!(bundle.class_names, vec!["A", "B"]);
        assert!(handle.is_loaded().await);

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_replace_swaps_while_old_snapshot_stays_usable() {
        let handle = ModelHandle::new("/nonexistent/model.json");
        let first = handle.replace(bundle_with_classes(&["A"])).await;
        let old_snapshot = handle.snapshot().await.unwrap();

        handle.replace(bundle_with_classes(&["A", "B", "C"])).await;

        // The pre-replacement snapshot is unchanged; new readers see the swap.
        assert_eq!(old_snapshot.class_names, first.class_names);
        assert_eq!(handle.snapshot().await.unwrap().class_names.len(), 3);
    }
}
