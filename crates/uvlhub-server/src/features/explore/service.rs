use uvlhub_common::types::Dataset;

use super::assembler::assemble;
use super::clause::parse_clauses;
use super::compiler::compile;
use crate::catalog::{CatalogError, SharedCatalog};

/// Entry point for dataset exploration.
///
/// Holds no state besides the catalog handle; concurrent calls are
/// independent.
#[derive(Clone)]
pub struct ExploreService {
    catalog: SharedCatalog,
}

impl ExploreService {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }

    /// Filter the catalog with an explore query.
    ///
    /// Never fails on account of its inputs; only catalog errors are returned.
    #[tracing::instrument(skip(self))]
    pub async fn filter(
        &self,
        query: &str,
        sorting: &str,
        publication_type: &str,
    ) -> Result<Vec<Dataset>, CatalogError> {
        let clauses = parse_clauses(query);
        tracing::debug!(clauses = clauses.len(), "Parsed explore query");

        let compiled = compile(clauses, sorting, publication_type);
        let results = assemble(self.catalog.as_ref(), &compiled).await?;

        tracing::debug!(count = results.len(), "Explore filter completed");
        Ok(results)
    }
}
