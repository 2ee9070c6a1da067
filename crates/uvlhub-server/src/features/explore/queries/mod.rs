pub mod filter_datasets;

pub use filter_datasets::{FilterDatasetsError, FilterDatasetsQuery, FilterDatasetsResponse};
