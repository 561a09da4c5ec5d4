//! Configuration types for the pipeline
//!
//! Configuration is built once at the entry point and passed by value into
//! the components that need it. There are no process-wide mutable settings.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the remote catalog service
pub const DEFAULT_BASE_URL: &str = "https://www.dnd5eapi.co/api/2014";

/// Default number of catalog entries fetched from the list endpoint
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Default number of records sampled per run
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Default output artifact path
pub const DEFAULT_OUTPUT_PATH: &str = "monsters.json";

/// Retry configuration for transient failures
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt (default: 3)
    pub max_attempts: u32,

    /// Delay before the first retry (default: 500 ms)
    pub initial_delay: Duration,

    /// Cap on the delay between retries (default: 10 seconds)
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    pub backoff_multiplier: f64,

    /// Whether to add random jitter to retry delays (default: true)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

/// Catalog Client configuration
///
/// Passed into [`CatalogClient::new`](crate::client::CatalogClient::new);
/// the base URL is validated there so a malformed value fails the run before
/// any network activity.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the catalog service (default: the D&D 5e API)
    pub base_url: String,

    /// Per-request timeout (default: 30 seconds)
    pub timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Retry policy shared by every request
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("monster-pipeline/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: RetryConfig::default(),
        }
    }
}

/// Per-run pipeline configuration, supplied once and never mutated
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Number of catalog entries to fetch from the list endpoint (default: 20)
    pub list_limit: usize,

    /// Number of records to sample from the window (default: 5)
    pub sample_size: usize,

    /// Path of the output artifact (default: `monsters.json`)
    pub output_path: PathBuf,

    /// Seed for deterministic sampling; `None` draws from entropy
    pub seed: Option<u64>,

    /// Concurrency limit for the detail fan-out; `None` means one request
    /// per sampled entry
    pub concurrency: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            list_limit: DEFAULT_LIST_LIMIT,
            sample_size: DEFAULT_SAMPLE_SIZE,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            seed: None,
            concurrency: None,
        }
    }
}

impl RunConfig {
    /// Validate the configuration before the run starts.
    ///
    /// A sample size exceeding the window is a misconfiguration caught here,
    /// before any network activity; the selector independently guards against
    /// the window coming back smaller than requested.
    pub fn validate(&self) -> Result<()> {
        if self.list_limit == 0 {
            return Err(Error::Config {
                message: "list limit must be at least 1".to_string(),
            });
        }
        if self.sample_size == 0 {
            return Err(Error::Config {
                message: "sample size must be at least 1".to_string(),
            });
        }
        if self.sample_size > self.list_limit {
            return Err(Error::Config {
                message: format!(
                    "sample size ({}) cannot exceed the list limit ({})",
                    self.sample_size, self.list_limit
                ),
            });
        }
        Ok(())
    }

    /// Effective fan-out concurrency for the detail resolution
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.unwrap_or(self.sample_size).max(1)
    }
}
