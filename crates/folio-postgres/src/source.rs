//! Contracts between the paginator and the data-access layer.
//!
//! The paginator never builds SQL itself. It describes the shape of the
//! bounded fetch it wants as a [`PageQuery`] and delegates query
//! construction and execution to a [`PageSource`] (or, for collections
//! reachable through an association, a [`RelatedSource`]). Implementations
//! decide how the scope translates to SQL, e.g. an equality filter for a
//! one-to-many association or a join for many-to-many.

use std::future::Future;

use folio_core::PageConfig;

use crate::PgResult;

/// The shape of a bounded, ordered fetch.
///
/// Order clauses are applied in sequence; the first clause is the primary
/// sort key. The count query for the same population must ignore all three
/// fields and count the unbounded matching set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
    /// Order clauses, primary clause first.
    pub order: Vec<String>,
}

impl PageQuery {
    /// Builds the query shape for a resolved configuration.
    pub fn from_config(config: &PageConfig) -> Self {
        Self {
            limit: config.limit(),
            offset: config.offset(),
            order: config.order().to_vec(),
        }
    }
}

impl From<&PageConfig> for PageQuery {
    fn from(config: &PageConfig) -> Self {
        Self::from_config(config)
    }
}

/// A queryable collection that can serve pages of records.
///
/// The two methods must address the same logical population: whatever
/// filters scope `find_bounded` must scope `count` as well. They are
/// called concurrently on shared references, so every call has to build
/// its own query from scratch; implementations must not keep per-request
/// builder state in `self`.
pub trait PageSource {
    /// The record type produced by the fetch query.
    type Record: Send;

    /// Executes the bounded, ordered fetch described by `query`.
    fn find_bounded(
        &self,
        query: &PageQuery,
    ) -> impl Future<Output = PgResult<Vec<Self::Record>>> + Send;

    /// Counts the unbounded matching population.
    fn count(&self) -> impl Future<Output = PgResult<i64>> + Send;
}

impl<S> PageSource for std::sync::Arc<S>
where
    S: PageSource + ?Sized,
{
    type Record = S::Record;

    fn find_bounded(
        &self,
        query: &PageQuery,
    ) -> impl Future<Output = PgResult<Vec<Self::Record>>> + Send {
        (**self).find_bounded(query)
    }

    fn count(&self) -> impl Future<Output = PgResult<i64>> + Send {
        (**self).count()
    }
}

/// A queryable collection scoped to records related to an owner entity
/// through an association.
///
/// Same contract as [`PageSource`], with the owner supplied per call. How
/// the association scope becomes SQL is entirely up to the implementation;
/// the paginator only requires that fetch and count agree on it.
pub trait RelatedSource<O> {
    /// The record type produced by the fetch query.
    type Record: Send;

    /// Executes the bounded, ordered fetch over records related to
    /// `owner`.
    fn find_related_bounded(
        &self,
        owner: &O,
        query: &PageQuery,
    ) -> impl Future<Output = PgResult<Vec<Self::Record>>> + Send;

    /// Counts all records related to `owner`.
    fn count_related(&self, owner: &O) -> impl Future<Output = PgResult<i64>> + Send;
}

impl<S, O> RelatedSource<O> for std::sync::Arc<S>
where
    S: RelatedSource<O> + ?Sized,
{
    type Record = S::Record;

    fn find_related_bounded(
        &self,
        owner: &O,
        query: &PageQuery,
    ) -> impl Future<Output = PgResult<Vec<Self::Record>>> + Send {
        (**self).find_related_bounded(owner, query)
    }

    fn count_related(&self, owner: &O) -> impl Future<Output = PgResult<i64>> + Send {
        (**self).count_related(owner)
    }
}
