//! Request batch validation and normalization
//!
//! Turns a raw `data` payload into the dense feature matrix the inference
//! adapter consumes. All validation failures carry the offending record
//! index so callers can fix malformed batches without guesswork.

use ndarray::Array2;
use serde_json::Value;

use crate::error::{PipelineError, Result};
use crate::schema::{coerce_feature, FEATURE_NAMES, REQUIRED_FEATURES};

/// Maximum number of records accepted in one request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Validate a request batch and produce the normalized feature matrix.
///
/// Records are either positional arrays of exactly 13 values or objects
/// keyed by the canonical feature names (missing keys default to 0). The
/// returned matrix has shape `(batch, 13)` with input row order preserved.
/// Pure function of its input.
pub fn normalize(data: &Value) -> Result<Array2<f64>> {
    let records = data.as_array().ok_or_else(|| {
        PipelineError::InvalidInput("Input must be a list of data records.".to_string())
    })?;

    if records.is_empty() {
        return Err(PipelineError::Validation("Input list is empty.".to_string()));
    }

    if records.len() > MAX_BATCH_SIZE {
        return Err(PipelineError::Validation(format!(
            "Batch size limit exceeded. Maximum is {MAX_BATCH_SIZE} records."
        )));
    }

    let mut flat = Vec::with_capacity(records.len() * REQUIRED_FEATURES);

    for (i, record) in records.iter().enumerate() {
        match record {
            Value::Object(map) => {
                // Absent keys default to zero; present keys must coerce.
                for key in FEATURE_NAMES {
                    match map.get(key) {
                        None => flat.push(0.0),
                        Some(value) => flat.push(coerce_value(i, value)?),
                    }
                }
            }
            Value::Array(seq) => {
                if seq.len() != REQUIRED_FEATURES {
                    return Err(PipelineError::Validation(format!(
                        "Record {i} has {} features, expected {REQUIRED_FEATURES}.",
                        seq.len()
                    )));
                }
                for value in seq {
                    flat.push(coerce_value(i, value)?);
                }
            }
            _ => {
                return Err(PipelineError::InvalidInput(format!(
                    "Record {i} must be a list or an object."
                )));
            }
        }
    }

    Ok(Array2::from_shape_vec((records.len(), REQUIRED_FEATURES), flat)?)
}

fn coerce_value(index: usize, value: &Value) -> Result<f64> {
    coerce_feature(value).ok_or_else(|| {
        PipelineError::Validation(format!(
            "Record {index} contains non-numeric data: {value}"
        ))
    })
}
