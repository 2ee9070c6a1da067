//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::catalog::CatalogError;
use crate::db::DbError;

/// Result type alias for server operations
pub type ServerResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Catalog(ref e) => {
                tracing::error!("Catalog error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "A catalog error occurred".to_string(),
                )
            },
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "A database error occurred".to_string(),
                )
            },
            AppError::Unavailable(ref message) => {
                tracing::warn!("Service unavailable: {}", message);
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", message.clone())
            },
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
