//! The paginated result surface.

use serde::{Deserialize, Serialize};

use crate::config::PageConfig;

/// One bounded, offset slice of an ordered result set, together with the
/// metadata describing the total population and the page boundaries.
///
/// A page is assembled once, after both the fetch and the count query have
/// completed, and never mutated afterwards; `maxPage` is derived from the
/// total and the page size, not independently settable. The serialized
/// form uses camelCase field names and is suitable as a JSON response
/// body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    current_page: i64,
    max_page: i64,
    records_per_page: i64,
    total_records: i64,
    records: Vec<T>,
}

impl<T> Page<T> {
    /// Assembles a page from fetched records and the total record count.
    ///
    /// The last page is `ceil(total / limit)`, with the guarantee that a
    /// page always exists: an empty collection still has one page. The
    /// current page is taken from the configuration verbatim, even when it
    /// lies beyond the last page: requesting such a page is not an error,
    /// it merely yields an empty or short record collection.
    pub fn assemble(records: Vec<T>, total: i64, config: &PageConfig) -> Self {
        let limit = config.limit();

        let max_page = if total > 0 {
            (total + limit - 1) / limit
        } else {
            1
        };

        Self {
            current_page: config.page(),
            max_page,
            records_per_page: limit,
            total_records: total,
            records,
        }
    }

    /// Returns the current page number (1-based).
    #[inline]
    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    /// Returns the last page number, at least 1.
    #[inline]
    pub fn max_page(&self) -> i64 {
        self.max_page
    }

    /// Returns the configured page size.
    #[inline]
    pub fn records_per_page(&self) -> i64 {
        self.records_per_page
    }

    /// Returns the total number of records across all pages.
    #[inline]
    pub fn total_records(&self) -> i64 {
        self.total_records
    }

    /// Returns the records of this page.
    #[inline]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Consumes the page, returning its records.
    #[inline]
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Returns whether this is the first page.
    #[inline]
    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// Returns whether this is the last page.
    ///
    /// Also true for a current page beyond the last page.
    #[inline]
    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.max_page
    }

    /// Maps the records to a different type, keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            current_page: self.current_page,
            max_page: self.max_page,
            records_per_page: self.records_per_page,
            total_records: self.total_records,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}
