//! Test fixtures for catalog and explore tests
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::features::shared::test_helpers::*;
//!
//! let dataset = TestDataset::new("Sample dataset")
//!     .with_tags("tag1,tag2")
//!     .with_author("Thor Odinson")
//!     .with_files(&[1000, 200])
//!     .build();
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;
use uvlhub_common::types::{
    Author, Dataset, DatasetMetadata, FeatureModel, HubFile, PublicationType,
};

/// Builder for test datasets
#[derive(Debug, Clone)]
pub struct TestDataset {
    dataset: Dataset,
}

impl TestDataset {
    /// Create a dataset with the given title and no files, created now
    pub fn new(title: &str) -> Self {
        Self {
            dataset: Dataset {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                created_at: Utc::now(),
                metadata: DatasetMetadata {
                    title: title.to_string(),
                    description: String::new(),
                    tags: String::new(),
                    publication_type: PublicationType::None,
                    publication_doi: None,
                    dataset_doi: None,
                    authors: Vec::new(),
                },
                feature_models: Vec::new(),
            },
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.dataset.metadata.description = description.to_string();
        self
    }

    pub fn with_tags(mut self, tags: &str) -> Self {
        self.dataset.metadata.tags = tags.to_string();
        self
    }

    pub fn with_publication_type(mut self, publication_type: PublicationType) -> Self {
        self.dataset.metadata.publication_type = publication_type;
        self
    }

    /// Set both the publication and dataset DOI
    pub fn with_doi(mut self, doi: &str) -> Self {
        self.dataset.metadata.publication_doi = Some(doi.to_string());
        self.dataset.metadata.dataset_doi = Some(doi.to_string());
        self
    }

    /// Append an author with no affiliation or ORCID
    pub fn with_author(mut self, name: &str) -> Self {
        self.dataset.metadata.authors.push(Author {
            name: name.to_string(),
            affiliation: None,
            orcid: None,
        });
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.dataset.created_at = created_at;
        self
    }

    /// Add one feature model holding a file per entry of `sizes`
    pub fn with_files(mut self, sizes: &[i64]) -> Self {
        let files = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| HubFile {
                id: Uuid::new_v4(),
                name: format!("file{i}.uvl"),
                checksum: format!("checksum{i}"),
                size,
            })
            .collect();

        self.dataset.feature_models.push(FeatureModel {
            id: Uuid::new_v4(),
            files,
        });
        self
    }

    pub fn build(self) -> Dataset {
        self.dataset
    }
}

/// File sizes for a dataset of `total` bytes spread over `count` files.
fn split_size(total: i64, count: usize) -> Vec<i64> {
    let extra = count.saturating_sub(1);
    let mut sizes = vec![100; extra];
    sizes.insert(0, total - 100 * extra as i64);
    sizes
}

/// The six datasets used throughout the explore tests.
///
/// | # | tags        | type                  | bytes  | files | authors      |
/// |---|-------------|-----------------------|--------|-------|--------------|
/// | 1 | tag1        | datamanagementplan    | 100000 | 1     | Thor Odinson |
/// | 2 | tag2        | annotationcollection  | 4000   | 2     | Author 2     |
/// | 3 | tag1,tag2   | book                  | 3000   | 4     | Author 3     |
/// | 4 | tag1,tag3   | datamanagementplan    | 50000  | 5     | Thor Odinson |
/// | 5 | tag1,tag2   | book                  | 8000   | 3     | Author 5     |
/// | 6 | tag3        | report                | 2000   | 1     | Author 6     |
///
/// Dataset 3 dates from 2021-03-05; the rest are one hour apart in 2024,
/// so newest first is 6, 5, 4, 2, 1, 3.
pub fn six_dataset_catalog() -> Vec<Dataset> {
    let specs: [(&str, PublicationType, i64, usize, Option<&str>); 6] = [
        ("tag1", PublicationType::DataManagementPlan, 100_000, 1, Some("Thor Odinson")),
        ("tag2", PublicationType::AnnotationCollection, 4000, 2, None),
        ("tag1,tag2", PublicationType::Book, 3000, 4, None),
        ("tag1,tag3", PublicationType::DataManagementPlan, 50_000, 5, Some("Thor Odinson")),
        ("tag1,tag2", PublicationType::Book, 8000, 3, None),
        ("tag3", PublicationType::Report, 2000, 1, None),
    ];
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    specs
        .iter()
        .enumerate()
        .map(|(i, &(tags, kind, total, files, author))| {
            let n = i + 1;
            let created_at = if n == 3 {
                Utc.with_ymd_and_hms(2021, 3, 5, 0, 0, 0).unwrap()
            } else {
                base + Duration::hours(n as i64)
            };
            let author = author.map_or_else(|| format!("Author {n}"), str::to_string);

            TestDataset::new(&format!("Sample dataset {n}"))
                .with_description(&format!("Description for dataset {n}"))
                .with_tags(tags)
                .with_publication_type(kind)
                .with_doi(&format!("10.1234/dataset{n}"))
                .with_author(&author)
                .with_created_at(created_at)
                .with_files(&split_size(total, files))
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uvlhub_common::types::DerivedProperties;

    #[test]
    fn test_six_dataset_catalog_shape() {
        let datasets = six_dataset_catalog();
        let sizes: Vec<_> = datasets.iter().map(|d| d.aggregate_file_size()).collect();
        let counts: Vec<_> = datasets.iter().map(|d| d.aggregate_file_count()).collect();

        assert_eq!(sizes, vec![100_000, 4000, 3000, 50_000, 8000, 2000]);
        assert_eq!(counts, vec![1, 2, 4, 5, 3, 1]);
    }
}
