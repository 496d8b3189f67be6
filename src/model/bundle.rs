//! Model bundle artifact: classifier, label table, and training metrics
//!
//! The on-disk format is a single JSON document. A missing file and a file
//! that fails to deserialize are reported as distinct conditions; neither is
//! ever silently defaulted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

use super::Classifier;

/// Training-time performance figures carried alongside the classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub test_accuracy: f64,
    pub test_f1: f64,
    pub cv_mean: f64,
}

/// The packaged model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    pub best_model: Classifier,
    pub class_names: Vec<String>,
    pub performance_metrics: PerformanceReport,
}

impl ModelBundle {
    /// Load a bundle from disk
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PipelineError::ModelNotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw).map_err(|e| PipelineError::ModelCorrupt(e.to_string()))
    }

    /// Parse a bundle from raw bytes (upload path)
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| PipelineError::ModelCorrupt(e.to_string()))
    }

    /// Save the bundle to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
