//! Mediator wiring for feature queries.
//!
//! Every query handler takes the shared catalog plus its request object.

pub use mediator::DefaultAsyncMediator;

use crate::catalog::SharedCatalog;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(catalog: SharedCatalog) -> AppMediator {
    DefaultAsyncMediator::builder()
        // Explore
        .add_handler({
            let catalog = catalog.clone();
            move |query| {
                let catalog = catalog.clone();
                async move { crate::features::explore::queries::filter_datasets::handle(catalog, query).await }
            }
        })
        // Stats
        .add_handler({
            let catalog = catalog.clone();
            move |query| {
                let catalog = catalog.clone();
                async move { crate::features::stats::queries::get_stats::handle(catalog, query).await }
            }
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_mediator_builds() {
        let catalog: SharedCatalog = Arc::new(InMemoryCatalog::default());
        let _mediator = build_mediator(catalog);
    }
}
