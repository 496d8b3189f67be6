//! Exoplanet classification service - Main Entry Point

use clap::Parser;
use exoplanet_server::cli::{cmd_inspect, cmd_predict, cmd_serve, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exoplanet_server=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Predict {
            model,
            data,
            output,
        }) => {
            cmd_predict(&model, &data, output.as_deref())?;
        }
        Some(Commands::Inspect { model }) => {
            cmd_inspect(&model)?;
        }
        Some(Commands::Serve { host, port }) => {
            cmd_serve(host, port).await?;
        }
        None => {
            // Default: serve (matches the original deployment behavior)
            cmd_serve(None, None).await?;
        }
    }

    Ok(())
}
