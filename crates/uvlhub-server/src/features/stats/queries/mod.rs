pub mod get_stats;

pub use get_stats::{GetStatsError, GetStatsQuery, StatsResponse};
