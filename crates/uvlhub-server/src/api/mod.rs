pub mod response;

use crate::catalog::{InMemoryCatalog, PgCatalog, SharedCatalog};
use crate::config::{CatalogBackend, Config};
use crate::db;
use crate::error::{AppError, ServerResult};
use crate::features;
use crate::middleware;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::compression::CompressionLayer;
use uvlhub_common::types::seed::read_seed_file;

#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
}

/// Build the catalog selected by the configuration.
///
/// The memory backend is filled from the seed file (empty without one). The
/// postgres backend is migrated, then seeded with any missing datasets.
pub async fn init_catalog(config: &Config) -> ServerResult<SharedCatalog> {
    let seed_path = config.catalog.seed_path.as_deref();

    match config.catalog.backend {
        CatalogBackend::Memory => {
            let catalog = match seed_path {
                Some(path) => InMemoryCatalog::from_seed_file(path)?,
                None => {
                    tracing::warn!("No CATALOG_SEED_PATH configured, starting with an empty catalog");
                    InMemoryCatalog::default()
                },
            };
            Ok(Arc::new(catalog))
        },
        CatalogBackend::Postgres => {
            let db_config = db::DbConfig::from_config(&config.database)?;
            let pool = db::create_pool(&db_config).await?;
            db::run_migrations(&pool).await?;

            let catalog = PgCatalog::new(pool);
            if let Some(path) = seed_path {
                let datasets = read_seed_file(path).map_err(crate::catalog::CatalogError::from)?;
                catalog.seed(&datasets).await?;
            }
            Ok(Arc::new(catalog))
        },
    }
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let catalog = init_catalog(&config).await?;
    let app = create_router(AppState { catalog }, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    let feature_state = features::FeatureState {
        catalog: state.catalog.clone(),
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .nest("/api/v1", features::router(feature_state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "UVLHub Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health(State(state): State<AppState>) -> Result<Response, AppError> {
    match state.catalog.ping().await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "catalog": "connected"
            })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Catalog health check failed: {:?}", e);
            Err(AppError::Unavailable("Catalog is not reachable".to_string()))
        },
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    tracing::info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
