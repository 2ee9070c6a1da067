//! Constraints on derived dataset properties.
//!
//! Aggregate file size and file count are not stored, so they cannot be
//! part of a [`CatalogQuery`](crate::catalog::CatalogQuery). They are
//! collected here and checked against each materialised dataset.

use uvlhub_common::types::{Dataset, DerivedProperties};

/// Inclusive bounds on derived properties. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeferredConstraints {
    pub min_size: Option<i64>,
    pub max_size: Option<i64>,
    pub models_min: Option<i64>,
    pub models_max: Option<i64>,
}

impl DeferredConstraints {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a dataset satisfies every bound.
    pub fn admits<D: DerivedProperties + ?Sized>(&self, dataset: &D) -> bool {
        if self.min_size.is_some() || self.max_size.is_some() {
            let size = dataset.aggregate_file_size();
            if self.min_size.is_some_and(|min| size < min) {
                return false;
            }
            if self.max_size.is_some_and(|max| size > max) {
                return false;
            }
        }

        match (self.models_min, self.models_max) {
            (None, None) => true,
            (Some(min), Some(max)) => {
                let count = dataset.aggregate_file_count();
                min <= count && count <= max
            }
            (min, max) => {
                let count = dataset.aggregate_file_count();
                min.is_some_and(|min| count >= min) || max.is_some_and(|max| count <= max)
            }
        }
    }

    /// Keep the datasets that satisfy every bound, in their original order.
    pub fn apply(&self, mut datasets: Vec<Dataset>) -> Vec<Dataset> {
        if !self.is_empty() {
            datasets.retain(|dataset| self.admits(dataset));
        }
        datasets
    }
}
