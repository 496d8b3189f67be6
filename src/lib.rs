//! Exoplanet candidate classification service
//!
//! Classifies candidate exoplanet observations with a pre-trained classifier
//! bundle loaded from disk.
//!
//! # Modules
//!
//! ## Core pipeline
//! - [`schema`] - Canonical 13-feature observation schema and coercion
//! - [`normalizer`] - Request batch validation into a dense feature matrix
//! - [`adapter`] - Padding, prediction, confidence, and result shaping
//!
//! ## Model
//! - [`model`] - Bundle artifact, classifier families, swappable handle
//!
//! ## Infrastructure
//! - [`monitoring`] - Request latency and error tracking
//!
//! ## Services
//! - [`server`] - HTTP server with REST API
//! - [`cli`] - Command-line interface

pub mod error;

// Core pipeline
pub mod adapter;
pub mod normalizer;
pub mod schema;

// Model
pub mod model;

// Infrastructure
pub mod monitoring;

// Services
pub mod cli;
pub mod server;

pub use error::{PipelineError, Result};
