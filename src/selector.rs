//! Random selection of catalog entries
//!
//! A pure function: no I/O, no state retained between calls. Sampling is
//! uniform and without replacement; supplying a seed makes the draw
//! reproducible.

use crate::error::{Error, Result};
use crate::types::CatalogEntry;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

/// Choose `k` entries uniformly at random, without replacement.
///
/// With a seed, the same input always yields the same selection. Fails with
/// [`Error::InsufficientData`] when `k` exceeds the number of entries.
pub fn select(entries: &[CatalogEntry], k: usize, seed: Option<u64>) -> Result<Vec<CatalogEntry>> {
    if k > entries.len() {
        return Err(Error::InsufficientData {
            requested: k,
            available: entries.len(),
        });
    }

    let indices = match seed {
        Some(seed) => index::sample(&mut StdRng::seed_from_u64(seed), entries.len(), k),
        None => index::sample(&mut rand::thread_rng(), entries.len(), k),
    };

    let selected: Vec<CatalogEntry> = indices.iter().map(|i| entries[i].clone()).collect();
    tracing::info!(
        selected = ?selected.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        "selected random entries"
    );
    Ok(selected)
}
