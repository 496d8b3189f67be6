//! Command-line interface
//!
//! Serve mode plus one-shot pipeline runs against a bundle file, useful for
//! smoke-testing an artifact before deploying it.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::adapter;
use crate::model::ModelBundle;
use crate::normalizer;
use crate::server::{run_server, ServerConfig};

#[derive(Parser)]
#[command(name = "exoplanet-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Exoplanet candidate classification service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides API_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides API_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the prediction pipeline once over a records file
    Predict {
        /// Model bundle file (.json)
        #[arg(short, long)]
        model: PathBuf,

        /// Input file holding a JSON list of records
        #[arg(short, long)]
        data: PathBuf,

        /// Output file for the response JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the label table and performance report of a bundle
    Inspect {
        /// Model bundle file (.json)
        #[arg(short, long)]
        model: PathBuf,
    },
}

pub async fn cmd_serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = ServerConfig::default();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    run_server(config).await
}

pub fn cmd_predict(model: &Path, data: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let bundle = ModelBundle::load(model)?;
    let records: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(data)?)?;

    let matrix = normalizer::normalize(&records)?;
    let (result, metrics) = adapter::predict(&bundle, &matrix, &records)?;

    let response = serde_json::json!({
        "success": true,
        "results": [result],
        "metrics": metrics,
    });
    let pretty = serde_json::to_string_pretty(&response)?;

    match output {
        Some(path) => std::fs::write(path, pretty)?,
        None => println!("{pretty}"),
    }
    Ok(())
}

pub fn cmd_inspect(model: &Path) -> anyhow::Result<()> {
    let bundle = ModelBundle::load(model)?;
    let report = &bundle.performance_metrics;

    println!("classes:             {}", bundle.class_names.join(", "));
    println!("input width:         {}", bundle.best_model.n_features());
    println!(
        "probability scoring: {}",
        if bundle.best_model.supports_probability() {
            "supported"
        } else {
            "unsupported"
        }
    );
    println!("test_accuracy:       {:.3}", report.test_accuracy);
    println!("test_f1:             {:.3}", report.test_f1);
    println!("cv_mean:             {:.3}", report.cv_mean);
    Ok(())
}
