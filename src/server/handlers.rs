//! HTTP request handlers

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    response::Html,
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::adapter;
use crate::model::ModelBundle;
use crate::normalizer;

use super::error::{Result, ServerError};
use super::state::AppState;

/// Accepted model artifact extensions for the upload path
const ALLOWED_MODEL_EXTENSIONS: [&str; 1] = ["json"];

/// Filename the uploaded artifact is persisted under
const UPLOADED_MODEL_FILENAME: &str = "user_model.json";

// ============================================================================
// Prediction
// ============================================================================

/// Run the normalization and inference pipeline over a request batch.
///
/// The body is parsed by hand so every failure, including malformed JSON,
/// leaves in the `{"success": false, "message"}` shape.
pub async fn predict(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<Value>> {
    let start = Instant::now();
    let outcome = run_prediction(&state, &body).await;

    match &outcome {
        Ok(_) => state
            .metrics
            .record_latency(start.elapsed().as_secs_f64() * 1000.0),
        Err(e) => {
            state.metrics.record_error();
            error!(error = %e, "Prediction failed");
        }
    }

    outcome
}

async fn run_prediction(state: &AppState, body: &[u8]) -> Result<Json<Value>> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid JSON body: {e}")))?;
    let data = payload.get("data").ok_or_else(|| {
        ServerError::BadRequest("Request body must contain a 'data' field.".to_string())
    })?;

    let matrix = normalizer::normalize(data)?;
    let bundle = state.model.acquire().await?;
    let (result, metrics) = adapter::predict(&bundle, &matrix, data)?;

    Ok(Json(json!({
        "success": true,
        "results": [result],
        "metrics": metrics,
    })))
}

// ============================================================================
// Model upload
// ============================================================================

/// Replace the active model bundle with an uploaded artifact.
///
/// The replacement is parsed and validated before the swap; a bad upload
/// leaves the current bundle untouched.
pub async fn upload_model(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(e.to_string()))?
    {
        let file_name = field.file_name().unwrap_or("").to_string();
        if file_name.is_empty() {
            return Err(ServerError::BadRequest("Empty filename".to_string()));
        }
        if !allowed_file(&file_name) {
            return Err(ServerError::BadRequest(
                "Invalid file type. Expected a .json model bundle.".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(e.to_string()))?;

        let bundle = ModelBundle::from_slice(&data)
            .map_err(|e| ServerError::BadRequest(format!("Error loading model: {e}")))?;

        std::fs::create_dir_all(&state.config.upload_dir)
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        let dest = std::path::Path::new(&state.config.upload_dir).join(UPLOADED_MODEL_FILENAME);
        std::fs::write(&dest, &data).map_err(|e| ServerError::Internal(e.to_string()))?;

        state.model.replace(bundle).await;
        info!(path = %dest.display(), size_bytes = data.len(), "User model uploaded and activated");

        return Ok(Json(json!({
            "success": true,
            "message": "Model uploaded and loaded",
        })));
    }

    Err(ServerError::BadRequest("No file provided".to_string()))
}

fn allowed_file(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_MODEL_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

// ============================================================================
// System
// ============================================================================

/// Health check endpoint for monitoring
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "model_loaded": state.model.is_loaded().await,
    }))
}

/// Request metrics snapshot
pub async fn get_request_stats(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!(state.metrics.snapshot()))
}

// ============================================================================
// UI
// ============================================================================

pub async fn serve_index() -> Html<&'static str> {
    Html(EMBEDDED_INDEX_HTML)
}

const EMBEDDED_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Exoplanet Classifier</title>
    <style>
        body{font-family:system-ui,sans-serif;background:#0b1020;color:#e8eaf2;max-width:720px;margin:2rem auto;padding:0 1rem}
        textarea{width:100%;height:10rem;background:#151b31;color:#e8eaf2;border:1px solid #2a3356;border-radius:6px;padding:.5rem;font-family:monospace}
        button{margin-top:.5rem;padding:.5rem 1.5rem;background:#3b5bdb;color:#fff;border:0;border-radius:6px;cursor:pointer}
        pre{background:#151b31;border:1px solid #2a3356;border-radius:6px;padding:1rem;overflow:auto}
    </style>
</head>
<body>
    <h1>Exoplanet Classifier</h1>
    <p>Paste a record batch and submit it to <code>/api/predict</code>.</p>
    <textarea id="input">{"data": [{"name": "Kepler-22b", "orbital_period": 289.9, "planet_radius": 2.4, "star_temp": 5518}]}</textarea>
    <button onclick="run()">Classify</button>
    <pre id="output">-</pre>
    <script>
    async function run(){
        const out = document.getElementById('output');
        try {
            const r = await fetch('/api/predict', {method:'POST', headers:{'Content-Type':'application/json'}, body:document.getElementById('input').value});
            out.textContent = JSON.stringify(await r.json(), null, 2);
        } catch (e) { out.textContent = String(e); }
    }
    </script>
</body>
</html>"#;
