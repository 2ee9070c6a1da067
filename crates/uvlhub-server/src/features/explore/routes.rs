use crate::api::response::{ApiResponse, ErrorResponse};
use crate::catalog::SharedCatalog;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::queries::{filter_datasets, FilterDatasetsError, FilterDatasetsQuery};

pub fn explore_routes() -> Router<SharedCatalog> {
    Router::new().route("/", get(explore_get).post(explore_post))
}

#[tracing::instrument(
    skip(catalog, query),
    fields(q = %query.query, sorting = %query.sorting, publication_type = %query.publication_type)
)]
async fn explore_get(
    State(catalog): State<SharedCatalog>,
    Query(query): Query<FilterDatasetsQuery>,
) -> Result<Response, ExploreApiError> {
    explore(catalog, query).await
}

#[tracing::instrument(
    skip(catalog, query),
    fields(q = %query.query, sorting = %query.sorting, publication_type = %query.publication_type)
)]
async fn explore_post(
    State(catalog): State<SharedCatalog>,
    Json(query): Json<FilterDatasetsQuery>,
) -> Result<Response, ExploreApiError> {
    explore(catalog, query).await
}

async fn explore(
    catalog: SharedCatalog,
    query: FilterDatasetsQuery,
) -> Result<Response, ExploreApiError> {
    let response = filter_datasets::handle(catalog, query).await?;
    let count = response.items.len();

    tracing::debug!(count, "Explore completed");

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(response.items, json!({ "count": count }))),
    )
        .into_response())
}

#[derive(Debug)]
struct ExploreApiError(FilterDatasetsError);

impl From<FilterDatasetsError> for ExploreApiError {
    fn from(err: FilterDatasetsError) -> Self {
        Self(err)
    }
}

impl std::fmt::Display for ExploreApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ExploreApiError {
    fn into_response(self) -> Response {
        match self.0 {
            FilterDatasetsError::Catalog(_) => {
                tracing::error!("Catalog error during explore: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A catalog error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
        }
    }
}
