//! Dataset catalog records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PublicationType;

/// Derived, non-stored properties of a dataset.
///
/// These are computed from the dataset's file records on demand, which is why
/// explore filters on them cannot be pushed into a relational query.
pub trait DerivedProperties {
    /// Sum of the sizes (in bytes) of every file in the dataset.
    fn aggregate_file_size(&self) -> i64;

    /// Number of files in the dataset.
    fn aggregate_file_count(&self) -> i64;
}

/// An author of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

/// A single uploaded model file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubFile {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub checksum: String,
    /// Size in bytes
    pub size: i64,
}

/// A feature model and the files uploaded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureModel {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub files: Vec<HubFile>,
}

/// Descriptive metadata attached one-to-one to a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Comma separated free text, e.g. `"tag1,tag2"`
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub publication_type: PublicationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_doi: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub metadata: DatasetMetadata,
    #[serde(default)]
    pub feature_models: Vec<FeatureModel>,
}

impl Dataset {
    /// Iterate over every file of every feature model.
    pub fn files(&self) -> impl Iterator<Item = &HubFile> {
        self.feature_models.iter().flat_map(|fm| fm.files.iter())
    }

    /// Tags split on commas, trimmed, with empty entries removed.
    pub fn tag_list(&self) -> Vec<&str> {
        self.metadata
            .tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

impl DerivedProperties for Dataset {
    fn aggregate_file_size(&self) -> i64 {
        self.files().map(|file| file.size).sum()
    }

    fn aggregate_file_count(&self) -> i64 {
        self.files().count() as i64
    }
}
