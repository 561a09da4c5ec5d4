//! # monster-pipeline
//!
//! Fetches a window of creature records from a remote read-only catalog,
//! samples a fixed-size random subset, resolves each sampled record's full
//! detail with bounded concurrency, projects it into a reduced schema, and
//! persists the result exactly once.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - the pipeline stages are plain modules; the bundled
//!   binary is a thin wrapper that maps the outcome to an exit code
//! - **One-directional data flow** - each stage consumes an immutable value
//!   and returns a new one; nothing shares mutable state
//! - **Idempotent output** - an existing artifact short-circuits the run
//!   before any network activity, and writes are atomic
//! - **Fail-fast** - the first unrecovered error aborts the run; no partial
//!   artifact is ever produced
//!
//! ## Quick Start
//!
//! ```no_run
//! use monster_pipeline::{CatalogClient, ClientConfig, Pipeline, RunConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(ClientConfig::default())?;
//!     let pipeline = Pipeline::new(client, RunConfig::default());
//!
//!     let outcome = pipeline.run().await?;
//!     println!("run finished: {:?}", outcome);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP client for the remote catalog service
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Pipeline orchestration
pub mod orchestrator;
/// Raw-to-output schema projection
pub mod projector;
/// Concurrent detail resolution
pub mod resolver;
/// Retry logic with exponential backoff
pub mod retry;
/// Random selection of catalog entries
pub mod selector;
/// Core types
pub mod types;
/// Idempotent atomic persistence
pub mod writer;

// Re-export commonly used types
pub use client::CatalogClient;
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_LIST_LIMIT, DEFAULT_OUTPUT_PATH, DEFAULT_SAMPLE_SIZE,
    RetryConfig, RunConfig,
};
pub use error::{Error, Result};
pub use orchestrator::Pipeline;
pub use types::{Action, CatalogEntry, DetailRecord, ListResponse, RunOutcome, Stage};
pub use writer::WriteOutcome;
