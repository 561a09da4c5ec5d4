//! Idempotent atomic persistence of the pipeline result
//!
//! The artifact is written at most once: an existing file at the output path
//! is left untouched and reported as [`WriteOutcome::AlreadyExists`]. The
//! write itself stages the full serialization into a temporary file in the
//! destination directory and renames it into place, so the output path never
//! holds partial content.

use crate::error::{Error, Result};
use crate::types::DetailRecord;
use std::io::Write as _;
use std::path::Path;
use tempfile::NamedTempFile;

/// Outcome of a write attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The artifact was serialized and renamed into place
    Written,
    /// A file already existed at the output path; nothing was written
    AlreadyExists,
}

/// Persist the result to `path` as a pretty-printed JSON array.
///
/// Returns [`WriteOutcome::AlreadyExists`] without touching the file when
/// `path` is already occupied, including when a concurrent writer wins the
/// final rename. Filesystem failures surface as [`Error::Write`].
pub fn write(result: &[DetailRecord], path: &Path) -> Result<WriteOutcome> {
    if path.exists() {
        tracing::info!(path = %path.display(), "output already exists, leaving it untouched");
        return Ok(WriteOutcome::AlreadyExists);
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let json = serde_json::to_string_pretty(result)?;

    let mut staged = NamedTempFile::new_in(parent).map_err(|e| {
        Error::Write(format!(
            "failed to stage output in {}: {e}",
            parent.display()
        ))
    })?;
    staged
        .write_all(json.as_bytes())
        .map_err(|e| Error::Write(format!("failed to write staged output: {e}")))?;
    staged
        .flush()
        .map_err(|e| Error::Write(format!("failed to flush staged output: {e}")))?;

    match staged.persist_noclobber(path) {
        Ok(_) => {
            tracing::info!(
                path = %path.display(),
                records = result.len(),
                "wrote pipeline result"
            );
            Ok(WriteOutcome::Written)
        }
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
            tracing::info!(path = %path.display(), "output appeared during write, keeping it");
            Ok(WriteOutcome::AlreadyExists)
        }
        Err(e) => Err(Error::Write(format!(
            "failed to persist output to {}: {}",
            path.display(),
            e.error
        ))),
    }
}
