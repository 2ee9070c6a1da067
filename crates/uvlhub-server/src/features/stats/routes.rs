use crate::api::response::ApiResponse;
use crate::catalog::SharedCatalog;
use crate::error::AppError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::queries::{get_stats, GetStatsError, GetStatsQuery};

pub fn stats_routes() -> Router<SharedCatalog> {
    Router::new().route("/", get(get_stats_handler))
}

#[tracing::instrument(skip(catalog))]
async fn get_stats_handler(State(catalog): State<SharedCatalog>) -> Result<Response, AppError> {
    let stats = get_stats::handle(catalog, GetStatsQuery).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(stats))).into_response())
}

impl From<GetStatsError> for AppError {
    fn from(err: GetStatsError) -> Self {
        match err {
            GetStatsError::Catalog(e) => AppError::Catalog(e),
        }
    }
}
