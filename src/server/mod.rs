//! HTTP server for the exoplanet classification service
//!
//! Exposes the prediction pipeline over a small REST API plus a landing
//! page. Routing lives in [`api`], handlers in [`handlers`], shared state
//! in [`state`].

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub upload_dir: String,
    pub static_dir: Option<String>,
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "exoplanet_model.json".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "user_models".to_string()),
            static_dir: Some(std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string())),
            max_upload_size: std::env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100 * 1024 * 1024), // 100MB
        }
    }
}

/// Start the server with the given configuration
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();

    std::fs::create_dir_all(&config.upload_dir)?;

    let state = Arc::new(AppState::new(config.clone()));

    // Startup load is best effort: a missing artifact is reported on every
    // predict attempt rather than keeping the service down.
    match state.model.load_from_disk().await {
        Ok(bundle) => info!(
            model_path = %config.model_path,
            classes = bundle.class_names.len(),
            "Model bundle loaded at startup"
        ),
        Err(e) => warn!(
            model_path = %config.model_path,
            error = %e,
            "Model bundle not loaded at startup; prediction requests will retry"
        ),
    }

    let app = create_router(Arc::clone(&state), &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        host = %config.host,
        port = config.port,
        started_at = %start_time.to_rfc3339(),
        "Exoplanet classification server starting"
    );
    info!(url = %format!("http://{}/api/predict", addr), "Prediction endpoint available");
    info!(url = %format!("http://{}/api/health", addr), "Health endpoint available");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Server listening and ready to accept connections");

    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        let stop_time = chrono::Utc::now();
        let uptime = stop_time.signed_duration_since(start_time);
        info!(
            stopped_at = %stop_time.to_rfc3339(),
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
