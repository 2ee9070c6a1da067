use uvlhub_common::types::Dataset;

use super::compiler::CompiledFilter;
use crate::catalog::{Catalog, CatalogError};

/// Run the relational half against the catalog, then apply the deferred
/// constraints to the materialised rows. Catalog order is preserved.
pub async fn assemble<C>(catalog: &C, compiled: &CompiledFilter) -> Result<Vec<Dataset>, CatalogError>
where
    C: Catalog + ?Sized,
{
    let matched = catalog.fetch(&compiled.query).await?;
    let fetched = matched.len();

    let results = compiled.deferred.apply(matched);

    tracing::debug!(fetched, retained = results.len(), "Assembled explore results");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogQuery, CatalogStats, InMemoryCatalog, Predicate};
    use crate::features::explore::deferred::DeferredConstraints;
    use crate::features::shared::test_helpers::TestDataset;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    struct FailingCatalog;

    #[async_trait]
    impl Catalog for FailingCatalog {
        async fn fetch(&self, _query: &CatalogQuery) -> Result<Vec<Dataset>, CatalogError> {
            Err(CatalogError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn stats(&self) -> Result<CatalogStats, CatalogError> {
            Err(CatalogError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn ping(&self) -> Result<(), CatalogError> {
            Err(CatalogError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    fn catalog() -> InMemoryCatalog {
        let now = Utc::now();
        InMemoryCatalog::new(vec![
            TestDataset::new("small")
                .with_tags("uvl")
                .with_files(&[10])
                .with_created_at(now - Duration::days(3))
                .build(),
            TestDataset::new("large")
                .with_tags("uvl")
                .with_files(&[1000, 1000])
                .with_created_at(now - Duration::days(2))
                .build(),
            TestDataset::new("medium")
                .with_tags("other")
                .with_files(&[500])
                .with_created_at(now - Duration::days(1))
                .build(),
        ])
    }

    #[tokio::test]
    async fn test_relational_then_deferred() {
        let compiled = CompiledFilter {
            query: CatalogQuery::new().filter(Predicate::TagsContain("uvl".into())),
            deferred: DeferredConstraints {
                min_size: Some(100),
                ..Default::default()
            },
        };

        let results = assemble(&catalog(), &compiled).await.unwrap();
        let titles: Vec<_> = results.iter().map(|d| d.metadata.title.as_str()).collect();
        assert_eq!(titles, vec!["large"]);
    }

    #[tokio::test]
    async fn test_everything_filtered_out_is_empty() {
        let compiled = CompiledFilter {
            deferred: DeferredConstraints {
                max_size: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(assemble(&catalog(), &compiled).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_order_survives_deferred_filtering() {
        let compiled = CompiledFilter {
            deferred: DeferredConstraints {
                min_size: Some(100),
                ..Default::default()
            },
            ..Default::default()
        };

        let results = assemble(&catalog(), &compiled).await.unwrap();
        let titles: Vec<_> = results.iter().map(|d| d.metadata.title.as_str()).collect();
        assert_eq!(titles, vec!["medium", "large"]);
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let err = assemble(&FailingCatalog, &CompiledFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Database(_)));
    }
}
