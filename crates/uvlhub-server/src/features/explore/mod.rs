//! Dataset exploration
//!
//! Filters the catalog with a small query language. A request flows through
//! four stages, each in its own module:
//!
//! - [`clause`]: split the raw query into [`FilterClause`]s
//! - [`compiler`]: fold clauses into a [`CatalogQuery`](crate::catalog::CatalogQuery)
//!   and [`DeferredConstraints`]
//! - [`assembler`]: run the catalog query and apply the deferred constraints
//! - [`service`]: [`ExploreService`] ties the stages together
//!
//! The HTTP surface lives in [`routes`] and goes through the
//! [`FilterDatasetsQuery`] CQRS query.

pub mod assembler;
pub mod clause;
pub mod compiler;
pub mod deferred;
pub mod queries;
pub mod routes;
pub mod service;
pub mod types;

pub use clause::{parse_clauses, FilterClause};
pub use compiler::{compile, CompiledFilter};
pub use deferred::DeferredConstraints;
pub use queries::{FilterDatasetsError, FilterDatasetsQuery, FilterDatasetsResponse};
pub use routes::explore_routes;
pub use service::ExploreService;
pub use types::DatasetSummary;
