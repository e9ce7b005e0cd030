//! Beacon stream position estimator binary
//!
//! Connects to a beacon observation stream, runs the estimation pipeline,
//! and renders each published snapshot to the terminal log.

use beaconfix::{BeaconStream, EstimationPipeline, Snapshot, SystemConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "beaconfix", about = "Beacon stream position estimator")]
struct Args {
    /// WebSocket endpoint of the beacon stream (overrides the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Path to a JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Resolve configuration from file, CLI overrides and defaults
fn load_config(args: &Args) -> Result<SystemConfig, beaconfix::ConfigError> {
    let mut config = match &args.config {
        Some(path) => SystemConfig::from_file(path)?,
        None => SystemConfig::default(),
    };
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if args.debug {
        config.debug_logging = true;
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(config: &SystemConfig) {
    let default_directive = if config.debug_logging { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Terminal renderer: consumes snapshots on its own schedule.
///
/// Runs until the pipeline is dropped and the snapshot channel closes. A
/// snapshot skipped because a newer one replaced it is not a loss; each
/// snapshot fully describes the current state.
async fn render_snapshots(mut rx: watch::Receiver<Snapshot>) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        match snapshot.estimate {
            Some(estimate) => info!(
                sequence = snapshot.sequence,
                beacons = snapshot.beacons.len(),
                x = estimate.x,
                y = estimate.y,
                "Observer estimate"
            ),
            None => info!(
                sequence = snapshot.sequence,
                beacons = snapshot.beacons.len(),
                "Estimate unavailable"
            ),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    let pipeline = Arc::new(EstimationPipeline::new());
    let renderer = tokio::spawn(render_snapshots(pipeline.subscribe()));

    let stream = BeaconStream::new(config.endpoint.clone());
    info!(endpoint = %config.endpoint, "Starting beacon ingestion");
    let result = stream.run(&pipeline).await;

    // Dropping the pipeline closes the snapshot channel and lets the
    // renderer finish
    drop(pipeline);
    let _ = renderer.await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Beacon ingestion failed");
            ExitCode::FAILURE
        }
    }
}
