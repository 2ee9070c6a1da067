use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use uvlhub_common::types::{Author, Dataset, DerivedProperties, PublicationType};

/// Dataset as returned by the explore endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub authors: Vec<Author>,
    pub publication_type: PublicationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_doi: Option<String>,
    /// DOI resolver link, present when the dataset has a DOI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub created_at_timestamp: i64,
    pub files_count: i64,
    pub total_size_in_bytes: i64,
    pub total_size_in_human_format: String,
}

impl From<&Dataset> for DatasetSummary {
    fn from(dataset: &Dataset) -> Self {
        let metadata = &dataset.metadata;
        let total_size = dataset.aggregate_file_size();

        Self {
            id: dataset.id,
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            authors: metadata.authors.clone(),
            publication_type: metadata.publication_type,
            publication_doi: metadata.publication_doi.clone(),
            dataset_doi: metadata.dataset_doi.clone(),
            url: metadata
                .dataset_doi
                .as_deref()
                .map(|doi| format!("https://doi.org/{doi}")),
            tags: dataset.tag_list().into_iter().map(str::to_string).collect(),
            created_at: dataset.created_at,
            created_at_timestamp: dataset.created_at.timestamp(),
            files_count: dataset.aggregate_file_count(),
            total_size_in_bytes: total_size,
            total_size_in_human_format: human_size(total_size),
        }
    }
}

/// Decimal units, e.g. `100 kB`. Negative totals are clamped to zero.
pub fn human_size(bytes: i64) -> String {
    humansize::format_size(u64::try_from(bytes).unwrap_or(0), humansize::DECIMAL)
}
