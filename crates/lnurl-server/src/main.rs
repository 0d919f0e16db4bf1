//! Lightning Address server.
//!
//! Serves LNURL-pay for a fixed set of usernames and asks an LND node for an
//! invoice on every callback.

mod config;
mod error;
mod listener;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lnd_invoicer::LndInvoicer;
use lnurl_pay::LnurlService;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::ServerError;

#[derive(Debug, Parser)]
#[command(name = "lnurl-server", version, about = "Lightning Address server backed by LND")]
struct Cli {
    /// Path to the YAML config file.
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Server stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    // Load configuration
    let config = Config::load(&cli.config)?;
    info!(config = %cli.config.display(), "Loaded configuration");

    let icon = config.read_icon()?;

    // Connect the invoice backend
    let invoicer = LndInvoicer::new(config.lnd_config()?)?;
    info!(host = %config.lnd.host, "Using LND backend");

    // Build metadata for every identity
    let service = LnurlService::new(config.service_config(), &icon, Arc::new(invoicer))?;

    // Start listeners
    let strategy = config.tls_strategy()?;
    listener::serve(strategy, service.router()).await?;

    Ok(())
}
