//! Request metrics
//!
//! Latency and error tracking for the prediction path. A rolling latency
//! window sits under one lock; plain counters are lock-free atomics.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::Serialize;

/// Metrics collector for the prediction endpoint
pub struct RequestMetrics {
    window_size: usize,
    latencies: RwLock<VecDeque<f64>>,
    total_requests: AtomicU64,
    total_errors: AtomicU64,
}

/// Point-in-time snapshot of request metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub avg_latency_ms: f64,
    pub p95_latency_ms: f64,
}

impl RequestMetrics {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            latencies: RwLock::new(VecDeque::with_capacity(window_size)),
            total_requests: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
        }
    }

    /// Record a completed request's latency
    pub fn record_latency(&self, latency_ms: f64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut window) = self.latencies.write() {
            window.push_back(latency_ms);
            if window.len() > self.window_size {
                window.pop_front();
            }
        }
    }

    /// Record a failed request
    pub fn record_error(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let (avg, p95) = match self.latencies.read() {
            Ok(window) if !window.is_empty() => {
                let avg = window.iter().sum::<f64>() / window.len() as f64;
                let mut sorted: Vec<f64> = window.iter().copied().collect();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let rank = ((sorted.len() as f64) * 0.95).ceil() as usize;
                let p95 = sorted[rank.saturating_sub(1).min(sorted.len() - 1)];
                (avg, p95)
            }
            _ => (0.0, 0.0),
        };

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            total_errors: self.total_errors.load(Ordering::Relaxed),
            avg_latency_ms: avg,
            p95_latency_ms: p95,
        }
    }
}
