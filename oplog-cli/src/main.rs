//! oplog-sync
//!
//! Command-line tool that pushes the commands recorded in a LokiC2 transcript
//! into a Ghostwriter oplog.

mod config;
mod sync;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use oplog_client::GhostwriterClient;
use oplog_core::Extractor;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "oplog-sync", version)]
#[command(about = "Parse a LokiC2 transcript and send its commands to Ghostwriter", long_about = None)]
struct Cli {
    /// Path to the log file
    input_file: PathBuf,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oplog_sync=warn,oplog_core=warn,oplog_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    let extractor = Extractor::new(config.entry_source());
    let client = GhostwriterClient::new(
        config.ghostwriter_url.as_str(),
        config.api_token.as_str(),
        config.operator_name.as_str(),
        config.insecure_skip_verify,
    )
    .context("Failed to build Ghostwriter client")?;

    sync::run_sync(
        &cli.input_file,
        &extractor,
        &client,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;

    Ok(())
}
