//! Pipeline orchestration
//!
//! Sequences one run through its stages: fetch the catalog window, sample
//! it, resolve the sampled entries, and persist the result. The state
//! machine is `Start → ListFetched → Selected → Resolved → Written → Done`,
//! with `Failed` reachable from any stage. A stage error is logged with the
//! stage it occurred in and propagated unmodified; there is no cross-stage
//! recovery.

use crate::client::CatalogClient;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::types::{DetailRecord, RunOutcome, Stage};
use crate::writer::WriteOutcome;
use crate::{resolver, selector, writer};
use std::collections::HashSet;

/// A single pipeline run over one client and one configuration
#[derive(Clone, Debug)]
pub struct Pipeline {
    client: CatalogClient,
    config: RunConfig,
}

impl Pipeline {
    /// Create a pipeline for a single run
    pub fn new(client: CatalogClient, config: RunConfig) -> Self {
        Self { client, config }
    }

    /// Execute the run.
    ///
    /// Before the first stage, an existing file at the output path completes
    /// the run immediately with [`RunOutcome::AlreadyComplete`] and zero
    /// network activity: the writer only ever produces complete artifacts,
    /// so existence means a prior run finished.
    pub async fn run(&self) -> Result<RunOutcome> {
        self.config.validate()?;

        if self.config.output_path.exists() {
            tracing::info!(
                path = %self.config.output_path.display(),
                "output already present, skipping run"
            );
            return Ok(RunOutcome::AlreadyComplete);
        }

        let entries = self
            .client
            .fetch_list(self.config.list_limit)
            .await
            .map_err(|e| self.fail(Stage::List, e))?;
        tracing::info!(entries = entries.len(), "catalog window fetched");

        let selected = selector::select(&entries, self.config.sample_size, self.config.seed)
            .map_err(|e| self.fail(Stage::Select, e))?;

        let resolved = resolver::resolve(
            &self.client,
            &selected,
            self.config.effective_concurrency(),
        )
        .await
        .map_err(|e| self.fail(Stage::Resolve, e))?;

        ensure_unique_names(&resolved).map_err(|e| self.fail(Stage::Resolve, e))?;

        let outcome = writer::write(&resolved, &self.config.output_path)
            .map_err(|e| self.fail(Stage::Write, e))?;

        match outcome {
            WriteOutcome::Written => {
                tracing::info!(
                    records = resolved.len(),
                    path = %self.config.output_path.display(),
                    "pipeline run complete"
                );
                Ok(RunOutcome::Completed)
            }
            WriteOutcome::AlreadyExists => Ok(RunOutcome::AlreadyComplete),
        }
    }

    fn fail(&self, stage: Stage, error: Error) -> Error {
        tracing::error!(stage = %stage, error = %error, "pipeline stage failed");
        error
    }
}

/// The resolved result must not contain duplicate names; a duplicate means
/// the upstream window itself was inconsistent.
fn ensure_unique_names(records: &[DetailRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.name.as_str()) {
            return Err(Error::SchemaValidation(format!(
                "duplicate record name {:?} in resolved result",
                record.name
            )));
        }
    }
    Ok(())
}
