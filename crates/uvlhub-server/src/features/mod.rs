//! Feature modules implementing the UVLHub API
//!
//! Each feature is a vertical slice with its own queries and routes, following
//! the CQRS (Command Query Responsibility Segregation) pattern. The catalog is
//! read-only from the API's point of view, so every slice is a query.
//!
//! # Features
//!
//! - **explore**: Dataset filtering with the explore query language
//! - **stats**: Catalog-wide counters for the dashboard
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Shared types (if needed)
//!
//! Queries implement the mediator pattern using the `mediator` crate.

pub mod explore;
pub mod shared;
pub mod stats;

use axum::Router;

use crate::catalog::SharedCatalog;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Dataset catalog queried by every feature
    pub catalog: SharedCatalog,
}

/// Creates the API router with all feature routes mounted
///
/// - `/explore` - Dataset filtering (GET and POST)
/// - `/stats` - Catalog counters
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/explore", explore::explore_routes().with_state(state.catalog.clone()))
        .nest("/stats", stats::stats_routes().with_state(state.catalog.clone()))
}
