//! Transformation analyzer command-line client.
//!
//! Mirrors the backend's environments and communications, then runs one
//! command against them:
//!
//!   tanalyzer list environments
//!   tanalyzer customize comm MQTT --pick requestType=Async ...
//!   tanalyzer analyse EnvA MQTT EnvB
//!
//! Logging honours `RUST_LOG`; `--verbose` raises the default to DEBUG.

use anyhow::{Context, Result};
use clap::Parser;
use tanalyzer_cli::{run, Cli};
use tanalyzer_sync::Session;
use tanalyzer_views::ViewSet;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = cli.sync_config()?;
    info!("Using backend {}", config.servlet_url);

    let session = Session::over_http(&config).context("Failed to create session")?;
    let views = ViewSet::attach(&session);

    let report = session.start().await;
    for failure in &report.failures {
        warn!(
            "Initial {} load of {} failed: {}",
            failure.class, failure.kind, failure.error
        );
    }

    let mut stdout = std::io::stdout().lock();
    run(&cli.command, &session, &views, &mut stdout).await
}
