//! Application state shared across handlers

use std::sync::Arc;

use crate::model::ModelHandle;
use crate::monitoring::RequestMetrics;

use super::ServerConfig;

/// Rolling window size for request latency tracking
const METRICS_WINDOW: usize = 1024;

pub struct AppState {
    pub config: ServerConfig,
    pub model: ModelHandle,
    pub metrics: Arc<RequestMetrics>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            model: ModelHandle::new(&config.model_path),
            metrics: Arc::new(RequestMetrics::new(METRICS_WINDOW)),
            config,
        }
    }
}
