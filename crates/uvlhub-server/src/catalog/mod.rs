//! Dataset catalog
//!
//! The catalog is the store of dataset records that the explore engine
//! queries. It is consumed through the [`Catalog`] trait so the engine never
//! knows which backend it is talking to:
//!
//! - [`InMemoryCatalog`]: immutable, seeded from JSON. Development, tests and
//!   benchmarks.
//! - [`PgCatalog`]: PostgreSQL through SQLx.
//!
//! A [`CatalogQuery`] is the relational half of an explore filter: a list of
//! conjunctive [`Predicate`]s plus an ordering. Anything that depends on
//! derived properties (aggregate file size or count) cannot be expressed here
//! and is applied by the caller after materialisation.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uvlhub_common::types::{Dataset, PublicationType};
use uvlhub_common::HubError;

pub use memory::InMemoryCatalog;
pub use postgres::PgCatalog;

/// Catalog handle shared across handlers.
pub type SharedCatalog = Arc<dyn Catalog>;

/// Ordering by creation time. Ties are broken by dataset id in the same
/// direction, so a query always returns the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// A single relational filter. All substring matches are case-insensitive and
/// literal: `%` and `_` in the needle match themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    PublicationTypeIs(PublicationType),
    TagsContain(String),
    TitleContains(String),
    /// Matches when either the title or the tags contain the needle.
    TitleOrTagsContain(String),
    /// Matches when at least one author's name contains the needle.
    AnyAuthorNameContains(String),
}

/// Composed relational query: every predicate must hold.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pub predicates: Vec<Predicate>,
    pub order: SortOrder,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate to the conjunction.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn order_by(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

/// Catalog-wide counters for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub datasets: i64,
    pub feature_models: i64,
    pub files: i64,
    pub total_size_in_bytes: i64,
}

/// Catalog failures. Never produced by the content of a query, only by the
/// backend itself.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to load catalog seed: {0}")]
    Seed(#[from] HubError),

    #[error("Corrupt catalog record: {0}")]
    Decode(String),
}

/// Read access to the dataset catalog.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    /// Materialise every dataset matching `query`, in the query's order, with
    /// authors and files attached.
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Dataset>, CatalogError>;

    async fn stats(&self) -> Result<CatalogStats, CatalogError>;

    /// Liveness check behind `/health`.
    async fn ping(&self) -> Result<(), CatalogError>;
}

#[async_trait]
impl<T: Catalog + ?Sized> Catalog for Arc<T> {
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Dataset>, CatalogError> {
        (**self).fetch(query).await
    }

    async fn stats(&self) -> Result<CatalogStats, CatalogError> {
        (**self).stats().await
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        (**self).ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder_chains_in_order() {
        let query = CatalogQuery::new()
            .filter(Predicate::TagsContain("tag1".into()))
            .filter(Predicate::TitleContains("sample".into()))
            .order_by(SortOrder::OldestFirst);

        assert_eq!(
            query.predicates,
            vec![
                Predicate::TagsContain("tag1".into()),
                Predicate::TitleContains("sample".into())
            ]
        );
        assert_eq!(query.order, SortOrder::OldestFirst);
    }

    #[test]
    fn test_default_query_is_unfiltered_newest_first() {
        let query = CatalogQuery::default();
        assert!(query.predicates.is_empty());
        assert_eq!(query.order, SortOrder::NewestFirst);
    }
}
