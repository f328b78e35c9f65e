//! Paginated query execution.
//!
//! One paginate call runs two queries: the bounded, ordered fetch and the
//! total count over the same population. The count runs on its own tokio
//! task while the fetch executes on the calling task; the call returns
//! only after both paths have finished, so no background work ever
//! outlives it.

use std::future::Future;
use std::sync::Arc;

use folio_core::{Page, PageConfig};

use crate::source::{PageQuery, PageSource, RelatedSource};
use crate::{PgError, PgResult, TRACING_TARGET_PAGINATE};

/// Executes paginated queries for a resolved configuration.
///
/// ## Example
///
/// ```rust,ignore
/// let paginator = Paginator::new(PageConfig::new().with_page(2));
/// let page = paginator.paginate(source).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Paginator {
    config: PageConfig,
}

impl Paginator {
    /// Creates a paginator for the given configuration.
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this paginator executes.
    #[inline]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Fetches one page of records from `source`.
    ///
    /// The count query runs concurrently with the fetch. If the fetch
    /// fails its error is returned, but only after the count path has
    /// been joined; if only the count fails, its error is returned
    /// instead. Store-level errors pass through verbatim.
    pub async fn paginate<S>(&self, source: S) -> PgResult<Page<S::Record>>
    where
        S: PageSource + Send + Sync + 'static,
        S::Record: Send + 'static,
    {
        execute(source, &self.config).await
    }

    /// Fetches one page of records related to `owner` through the
    /// association embodied by `source`.
    ///
    /// Identical to [`Paginator::paginate`] except that both queries are
    /// scoped to the owner's related collection.
    pub async fn paginate_related<S, O>(&self, source: S, owner: O) -> PgResult<Page<S::Record>>
    where
        S: RelatedSource<O> + Send + Sync + 'static,
        S::Record: Send + 'static,
        O: Send + Sync + 'static,
    {
        execute(OwnerScoped { source, owner }, &self.config).await
    }
}

/// Fetches one page of records from `source`.
///
/// Convenience wrapper around [`Paginator::paginate`].
pub async fn paginate<S>(source: S, config: PageConfig) -> PgResult<Page<S::Record>>
where
    S: PageSource + Send + Sync + 'static,
    S::Record: Send + 'static,
{
    Paginator::new(config).paginate(source).await
}

/// Fetches one page of records related to `owner`.
///
/// Convenience wrapper around [`Paginator::paginate_related`].
pub async fn paginate_related<S, O>(
    source: S,
    owner: O,
    config: PageConfig,
) -> PgResult<Page<S::Record>>
where
    S: RelatedSource<O> + Send + Sync + 'static,
    S::Record: Send + 'static,
    O: Send + Sync + 'static,
{
    Paginator::new(config).paginate_related(source, owner).await
}

/// Adapts a related source plus one owner into a plain page source.
struct OwnerScoped<S, O> {
    source: S,
    owner: O,
}

impl<S, O> PageSource for OwnerScoped<S, O>
where
    S: RelatedSource<O> + Send + Sync,
    O: Send + Sync,
{
    type Record = S::Record;

    fn find_bounded(
        &self,
        query: &PageQuery,
    ) -> impl Future<Output = PgResult<Vec<Self::Record>>> + Send {
        self.source.find_related_bounded(&self.owner, query)
    }

    fn count(&self) -> impl Future<Output = PgResult<i64>> + Send {
        self.source.count_related(&self.owner)
    }
}

/// Runs the fetch and count paths for one paginate call and reconciles
/// their outcomes.
#[tracing::instrument(
    skip_all,
    target = TRACING_TARGET_PAGINATE,
    fields(page = config.page(), limit = config.limit())
)]
async fn execute<S>(source: S, config: &PageConfig) -> PgResult<Page<S::Record>>
where
    S: PageSource + Send + Sync + 'static,
    S::Record: Send + 'static,
{
    let query = PageQuery::from_config(config);
    let source = Arc::new(source);

    tracing::debug!(
        target: TRACING_TARGET_PAGINATE,
        offset = query.offset,
        order = ?query.order,
        "Executing paginated fetch and count"
    );

    let counter = Arc::clone(&source);
    let count_task = tokio::spawn(async move { counter.count().await });

    let fetched = source.find_bounded(&query).await;

    // Join the count path before looking at the fetch outcome, so the
    // call never leaves work running in the background.
    let counted = count_task.await;

    // A fetch failure takes precedence; the count outcome is discarded.
    let records = fetched?;

    let total = match counted {
        Ok(outcome) => outcome?,
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_PAGINATE,
                error = %err,
                "Count task failed to deliver an outcome"
            );
            return Err(PgError::Unexpected(
                "count task failed to deliver an outcome".into(),
            ));
        }
    };

    tracing::debug!(
        target: TRACING_TARGET_PAGINATE,
        total,
        fetched = records.len(),
        "Assembling page"
    );

    Ok(Page::assemble(records, total, config))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// Recording double for the data-access collaborator.
    #[derive(Default)]
    struct StubSource {
        rows: Vec<i32>,
        total: i64,
        fail_fetch: bool,
        fail_count: bool,
        count_delay_ms: u64,
        seen_query: Mutex<Option<PageQuery>>,
        fetch_calls: AtomicUsize,
        count_calls: AtomicUsize,
    }

    impl StubSource {
        fn with_data(rows: Vec<i32>, total: i64) -> Self {
            Self {
                rows,
                total,
                ..Self::default()
            }
        }
    }

    impl PageSource for StubSource {
        type Record = i32;

        async fn find_bounded(&self, query: &PageQuery) -> PgResult<Vec<i32>> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_query.lock().unwrap() = Some(query.clone());

            if self.fail_fetch {
                return Err(PgError::Query(diesel::result::Error::NotFound));
            }

            Ok(self.rows.clone())
        }

        async fn count(&self) -> PgResult<i64> {
            if self.count_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.count_delay_ms)).await;
            }
            self.count_calls.fetch_add(1, Ordering::SeqCst);

            if self.fail_count {
                return Err(PgError::Unexpected("count failed".into()));
            }

            Ok(self.total)
        }
    }

    fn config(page: i64, limit: i64) -> PageConfig {
        PageConfig::new().with_page(page).with_limit(limit)
    }

    #[tokio::test]
    async fn paginate_assembles_page() {
        let source = Arc::new(StubSource::with_data(vec![17, 18], 21));
        let config = config(5, 2).with_order(["name DESC", "id"]);

        let page = paginate(Arc::clone(&source), config).await.unwrap();

        assert_eq!(page.records(), [17, 18]);
        assert_eq!(page.total_records(), 21);
        assert_eq!(page.current_page(), 5);
        assert_eq!(page.max_page(), 11);
        assert_eq!(page.records_per_page(), 2);

        let query = source.seen_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.limit, 2);
        assert_eq!(query.offset, 8);
        assert_eq!(query.order, ["name DESC", "id"]);

        assert_eq!(source.fetch_calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.count_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn paginate_empty_collection() {
        let page = paginate(StubSource::with_data(Vec::new(), 0), config(1, 20))
            .await
            .unwrap();

        assert_eq!(page.max_page(), 1);
        assert!(page.records().is_empty());
        assert!(page.is_first_page());
        assert!(page.is_last_page());
    }

    #[tokio::test]
    async fn paginate_beyond_last_page() {
        let page = paginate(StubSource::with_data(Vec::new(), 21), config(3, 20))
            .await
            .unwrap();

        assert_eq!(page.current_page(), 3);
        assert_eq!(page.max_page(), 2);
        assert!(page.is_last_page());
    }

    #[tokio::test]
    async fn fetch_error_wins_and_count_is_drained() {
        let source = Arc::new(StubSource {
            fail_fetch: true,
            count_delay_ms: 50,
            ..StubSource::default()
        });

        let err = paginate(Arc::clone(&source), config(1, 20))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PgError::Query(diesel::result::Error::NotFound)
        ));
        // The slow count path still ran to completion before the call
        // returned.
        assert_eq!(source.count_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_error_wins_when_both_fail() {
        let source = StubSource {
            fail_fetch: true,
            fail_count: true,
            ..StubSource::default()
        };

        let err = paginate(source, config(1, 20)).await.unwrap_err();
        assert!(matches!(err, PgError::Query(_)));
    }

    #[tokio::test]
    async fn count_error_surfaces_when_fetch_succeeds() {
        let source = StubSource {
            rows: vec![1],
            fail_count: true,
            ..StubSource::default()
        };

        let err = paginate(source, config(1, 20)).await.unwrap_err();
        assert!(matches!(err, PgError::Unexpected(message) if message == "count failed"));
    }

    #[tokio::test]
    async fn paginator_entry_point_matches_free_function() {
        let paginator = Paginator::new(config(2, 10));
        let page = paginator
            .paginate(StubSource::with_data(vec![11], 11))
            .await
            .unwrap();

        assert_eq!(paginator.config().page(), 2);
        assert_eq!(page.current_page(), 2);
        assert_eq!(page.max_page(), 2);
    }

    /// Recording double for an association-scoped collaborator.
    #[derive(Default)]
    struct StubRelatedSource {
        rows: Vec<i32>,
        total: i64,
        seen_owner: Mutex<Option<i32>>,
        counted_owner: Mutex<Option<i32>>,
    }

    struct Owner {
        id: i32,
    }

    impl RelatedSource<Owner> for StubRelatedSource {
        type Record = i32;

        async fn find_related_bounded(
            &self,
            owner: &Owner,
            _query: &PageQuery,
        ) -> PgResult<Vec<i32>> {
            *self.seen_owner.lock().unwrap() = Some(owner.id);
            Ok(self.rows.clone())
        }

        async fn count_related(&self, owner: &Owner) -> PgResult<i64> {
            *self.counted_owner.lock().unwrap() = Some(owner.id);
            Ok(self.total)
        }
    }

    #[tokio::test]
    async fn paginate_related_scopes_both_paths_to_the_owner() {
        let source = Arc::new(StubRelatedSource {
            rows: vec![7],
            total: 1,
            ..StubRelatedSource::default()
        });

        let page = paginate_related(Arc::clone(&source), Owner { id: 42 }, config(1, 10))
            .await
            .unwrap();

        assert_eq!(page.records(), [7]);
        assert_eq!(page.total_records(), 1);
        assert_eq!(*source.seen_owner.lock().unwrap(), Some(42));
        assert_eq!(*source.counted_owner.lock().unwrap(), Some(42));
    }
}
