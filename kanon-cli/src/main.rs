//! kanon - command-line front-end for the remote anonymization service
//!
//! Submits datasets plus a reference to an externally hosted
//! anonymization configuration, and shapes the returned privacy KPIs
//! (k-anonymity and per-attribute anonymization metadata).

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use kanon_cli::cli::{Cli, Commands};
use kanon_cli::commands;
use kanon_cli::config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_config = config::load_config_file();
    let endpoints = config::resolve_endpoints(
        cli.api_url.as_deref(),
        cli.canonical_url.as_deref(),
        &file_config,
    );
    debug!(
        api_url = %endpoints.api_url,
        canonical_url = %endpoints.canonical_url,
        "Resolved service endpoints"
    );

    match cli.command {
        Commands::Anonymize(args) => commands::anonymize(args, &endpoints).await,
        Commands::Kpis(args) => commands::kpis(args),
        Commands::Strip(args) => commands::strip(args),
        Commands::Canonicalize(args) => commands::canonicalize(args, &endpoints).await,
    }
}
