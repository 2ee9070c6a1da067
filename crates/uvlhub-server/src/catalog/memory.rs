//! In-memory catalog backend.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use uvlhub_common::types::{seed::read_seed_file, Dataset};

use super::{Catalog, CatalogError, CatalogQuery, CatalogStats, Predicate, SortOrder};

/// Immutable catalog held in memory.
///
/// Cloning is cheap; all clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    datasets: Arc<Vec<Dataset>>,
}

impl InMemoryCatalog {
    pub fn new(datasets: Vec<Dataset>) -> Self {
        Self {
            datasets: Arc::new(datasets),
        }
    }

    /// Load the catalog from a JSON seed file (an array of datasets).
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let datasets = read_seed_file(path)?;
        tracing::info!(path = %path.display(), datasets = datasets.len(), "Loaded in-memory catalog");
        Ok(Self::new(datasets))
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Predicate {
    /// Evaluate the predicate against one record.
    pub fn matches(&self, dataset: &Dataset) -> bool {
        let metadata = &dataset.metadata;
        match self {
            Predicate::PublicationTypeIs(kind) => metadata.publication_type == *kind,
            Predicate::TagsContain(needle) => contains_ignore_case(&metadata.tags, needle),
            Predicate::TitleContains(needle) => contains_ignore_case(&metadata.title, needle),
            Predicate::TitleOrTagsContain(needle) => {
                contains_ignore_case(&metadata.title, needle)
                    || contains_ignore_case(&metadata.tags, needle)
            }
            Predicate::AnyAuthorNameContains(needle) => metadata
                .authors
                .iter()
                .any(|author| contains_ignore_case(&author.name, needle)),
        }
    }
}

fn sort_datasets(datasets: &mut [Dataset], order: SortOrder) {
    match order {
        SortOrder::NewestFirst => datasets.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        }),
        SortOrder::OldestFirst => datasets.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        }),
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Dataset>, CatalogError> {
        let mut hits: Vec<Dataset> = self
            .datasets
            .iter()
            .filter(|dataset| query.predicates.iter().all(|p| p.matches(dataset)))
            .cloned()
            .collect();

        sort_datasets(&mut hits, query.order);
        Ok(hits)
    }

    async fn stats(&self) -> Result<CatalogStats, CatalogError> {
        use uvlhub_common::types::DerivedProperties;

        Ok(self
            .datasets
            .iter()
            .fold(CatalogStats::default(), |mut stats, dataset| {
                stats.datasets += 1;
                stats.feature_models += dataset.feature_models.len() as i64;
                stats.files += dataset.aggregate_file_count();
                stats.total_size_in_bytes += dataset.aggregate_file_size();
                stats
            }))
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}
