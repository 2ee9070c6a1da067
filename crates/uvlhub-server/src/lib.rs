//! UVLHub Server Library
//!
//! HTTP server for exploring a catalog of UVL feature-model datasets.
//!
//! # Overview
//!
//! - **Catalog**: Read access to dataset records, in memory or in PostgreSQL
//! - **Explore**: A small query language (`tags:uvl;min_size:1000;author:Smith`)
//!   compiled into a catalog query plus constraints on derived properties
//! - **API Endpoints**: `/api/v1/explore` and `/api/v1/stats`
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS, request tracing and compression
//!
//! # Architecture
//!
//! Features are vertical slices under [`features`], each exposing CQRS query
//! objects that are dispatched through [`cqrs::build_mediator`] or called
//! directly from the slice's routes.
//!
//! # Example
//!
//! ```no_run
//! use uvlhub_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, SharedCatalog};
pub use error::{AppError, ServerResult};
