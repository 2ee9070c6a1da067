use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, SharedCatalog};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GetStatsQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub datasets_counter: i64,
    pub feature_models_counter: i64,
    pub files_counter: i64,
    pub total_size_in_bytes: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetStatsError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl Request<Result<StatsResponse, GetStatsError>> for GetStatsQuery {}

impl crate::cqrs::middleware::Query for GetStatsQuery {}

#[tracing::instrument(skip(catalog))]
pub async fn handle(
    catalog: SharedCatalog,
    _query: GetStatsQuery,
) -> Result<StatsResponse, GetStatsError> {
    let stats = catalog.stats().await?;

    Ok(StatsResponse {
        datasets_counter: stats.datasets,
        feature_models_counter: stats.feature_models,
        files_counter: stats.files,
        total_size_in_bytes: stats.total_size_in_bytes,
    })
}
