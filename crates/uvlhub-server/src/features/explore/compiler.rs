//! Folds parsed clauses into a catalog query plus deferred constraints.

use uvlhub_common::types::PublicationType;

use super::clause::FilterClause;
use super::deferred::DeferredConstraints;
use crate::catalog::{CatalogQuery, Predicate, SortOrder};

/// Selector value meaning "do not filter on publication type".
pub const ANY_PUBLICATION_TYPE: &str = "any";

/// A compiled explore filter, split by where each half is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledFilter {
    pub query: CatalogQuery,
    pub deferred: DeferredConstraints,
}

/// `oldest` sorts ascending; every other value sorts newest first.
pub fn sort_order(sorting: &str) -> SortOrder {
    match sorting {
        "oldest" => SortOrder::OldestFirst,
        _ => SortOrder::NewestFirst,
    }
}

/// Resolve the publication type selector. Unrecognised values apply no filter.
pub fn publication_filter(selector: &str) -> Option<PublicationType> {
    if selector == ANY_PUBLICATION_TYPE {
        return None;
    }
    let resolved = PublicationType::from_value(selector);
    if resolved.is_none() {
        tracing::debug!(selector, "Unknown publication type selector, not filtering");
    }
    resolved
}

/// Compile clauses, sort order and publication type selector.
///
/// Textual clauses each add a conjunctive predicate. For numeric clauses the
/// last occurrence of each kind wins.
pub fn compile<I>(clauses: I, sorting: &str, publication_type: &str) -> CompiledFilter
where
    I: IntoIterator<Item = FilterClause>,
{
    let mut query = CatalogQuery::new().order_by(sort_order(sorting));
    let mut deferred = DeferredConstraints::default();

    if let Some(kind) = publication_filter(publication_type) {
        query = query.filter(Predicate::PublicationTypeIs(kind));
    }

    for clause in clauses {
        match clause {
            FilterClause::Tag(needle) => query = query.filter(Predicate::TagsContain(needle)),
            FilterClause::Title(needle) => query = query.filter(Predicate::TitleContains(needle)),
            FilterClause::Author(needle) => {
                query = query.filter(Predicate::AnyAuthorNameContains(needle))
            }
            FilterClause::FreeText(needle) => {
                query = query.filter(Predicate::TitleOrTagsContain(needle))
            }
            FilterClause::MinSize(n) => deferred.min_size = Some(n),
            FilterClause::MaxSize(n) => deferred.max_size = Some(n),
            FilterClause::ModelsMin(n) => deferred.models_min = Some(n),
            FilterClause::ModelsMax(n) => deferred.models_max = Some(n),
        }
    }

    CompiledFilter { query, deferred }
}
