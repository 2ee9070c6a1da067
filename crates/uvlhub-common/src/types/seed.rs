//! JSON seed files for populating a catalog.
//!
//! A seed file is a JSON array of [`Dataset`] records.

use std::path::Path;

use super::Dataset;
use crate::Result;

/// Read every dataset from a JSON seed file.
pub fn read_seed_file(path: impl AsRef<Path>) -> Result<Vec<Dataset>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let datasets: Vec<Dataset> = serde_json::from_str(&raw)?;
    tracing::debug!(path = %path.display(), count = datasets.len(), "Read seed file");
    Ok(datasets)
}
