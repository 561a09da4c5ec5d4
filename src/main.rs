//! Command-line entry point for the pipeline
//!
//! A thin wrapper over the library: flags become a [`RunConfig`] and
//! [`ClientConfig`], the pipeline runs once, and the outcome maps to the
//! process exit code. A completed run exits 0 (including the idempotent
//! short-circuit); a failed one exits 1 with the error on stderr.

use clap::Parser;
use monster_pipeline::{CatalogClient, ClientConfig, Pipeline, RunConfig, RunOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "monster-pipeline",
    version,
    about = "Fetch a catalog window, sample random records, and persist their details"
)]
struct Cli {
    /// Number of records to sample from the catalog window
    #[arg(long, default_value_t = monster_pipeline::DEFAULT_SAMPLE_SIZE)]
    count: usize,

    /// Number of catalog entries to fetch from the list endpoint
    #[arg(long, default_value_t = monster_pipeline::DEFAULT_LIST_LIMIT)]
    limit: usize,

    /// Output file path
    #[arg(long, default_value = monster_pipeline::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Seed for deterministic sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Base URL of the catalog service
    #[arg(long, default_value = monster_pipeline::DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client_config = ClientConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout_secs),
        ..ClientConfig::default()
    };
    let run_config = RunConfig {
        list_limit: cli.limit,
        sample_size: cli.count,
        output_path: cli.output,
        seed: cli.seed,
        concurrency: None,
    };

    let client = match CatalogClient::new(client_config) {
        Ok(client) => client,
        Err(error) => {
            tracing::error!(error = %error, "failed to build catalog client");
            return ExitCode::FAILURE;
        }
    };

    match Pipeline::new(client, run_config).run().await {
        Ok(RunOutcome::Completed) => {
            tracing::info!("pipeline completed");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::AlreadyComplete) => {
            tracing::info!("output already present, nothing to do");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(error = %error, "pipeline failed");
            ExitCode::FAILURE
        }
    }
}
