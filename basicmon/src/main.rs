//! Entry point for basicmon. Parses args, loads config and runs the App.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use basicmon::app::App;
use basicmon::cli::Cli;
use basicmon::config::Settings;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    // stderr belongs to the dashboard; without a file there is nowhere to log
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("basicmon=info,basicmon_sampler=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let settings = Settings::resolve(&cli).context("invalid configuration")?;
    tracing::info!(?settings, "starting");

    let mut app = App::new(settings);
    app.run().await
}
