//! Filter datasets query
//!
//! Runs an explore query against the catalog and returns dataset summaries
//! in result order.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, SharedCatalog};
use crate::features::explore::service::ExploreService;
use crate::features::explore::types::DatasetSummary;

/// Query to filter the dataset catalog. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDatasetsQuery {
    /// `;` separated clauses, e.g. `tags:uvl;min_size:1000`
    #[serde(default)]
    pub query: String,
    /// `newest` or `oldest`
    #[serde(default = "default_sorting")]
    pub sorting: String,
    /// Publication type value, or `any`
    #[serde(default = "default_publication_type")]
    pub publication_type: String,
}

fn default_sorting() -> String {
    "newest".to_string()
}

fn default_publication_type() -> String {
    "any".to_string()
}

impl Default for FilterDatasetsQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            sorting: default_sorting(),
            publication_type: default_publication_type(),
        }
    }
}

impl FilterDatasetsQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDatasetsResponse {
    pub items: Vec<DatasetSummary>,
}

#[derive(Debug, thiserror::Error)]
pub enum FilterDatasetsError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl Request<Result<FilterDatasetsResponse, FilterDatasetsError>> for FilterDatasetsQuery {}

impl crate::cqrs::middleware::Query for FilterDatasetsQuery {}

#[tracing::instrument(skip(catalog))]
pub async fn handle(
    catalog: SharedCatalog,
    query: FilterDatasetsQuery,
) -> Result<FilterDatasetsResponse, FilterDatasetsError> {
    let datasets = ExploreService::new(catalog)
        .filter(&query.query, &query.sorting, &query.publication_type)
        .await?;

    Ok(FilterDatasetsResponse {
        items: datasets.iter().map(DatasetSummary::from).collect(),
    })
}
