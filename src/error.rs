//! Error types for the exoplanet prediction pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Main error type for the prediction pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A payload element has the wrong type (non-list batch, non-record entry).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A payload element has the right type but an unusable value
    /// (empty batch, oversized batch, bad feature count, non-numeric feature).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model artifact does not exist at the configured path.
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    /// The model artifact exists but could not be deserialized.
    #[error("Model artifact is corrupt: {0}")]
    ModelCorrupt(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

impl From<ndarray::ShapeError> for PipelineError {
    fn from(err: ndarray::ShapeError) -> Self {
        PipelineError::Shape {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::Validation("Record 3 has 12 features, expected 13.".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: Record 3 has 12 features, expected 13."
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PipelineError = io_err.into();
        assert!(matches!(err, PipelineError::Io(_)));
    }

    #[test]
    fn test_model_errors_are_distinct() {
        let missing = PipelineError::ModelNotFound("exoplanet_model.json".to_string());
        let corrupt = PipelineError::ModelCorrupt("expected value at line 1".to_string());
        assert!(missing.to_string().contains("not found"));
        assert!(corrupt.to_string().contains("corrupt"));
    }
}
