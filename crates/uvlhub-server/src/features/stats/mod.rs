//! Catalog-wide counters for the dashboard.

pub mod queries;
pub mod routes;

pub use queries::{GetStatsError, GetStatsQuery, StatsResponse};
pub use routes::stats_routes;
