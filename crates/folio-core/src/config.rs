//! Pagination configuration assembled from fluent options.
//!
//! A [`PageConfig`] starts from process-wide defaults and is refined by
//! chaining options. Every option except [`PageConfig::with_order`]
//! conditionally overwrites: an invalid value is a no-op and the last
//! valid value wins.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

/// Process-wide default page size, configurable at startup.
static DEFAULT_LIMIT: AtomicI64 = AtomicI64::new(20);

/// Returns the process-wide default page size.
#[inline]
pub fn default_limit() -> i64 {
    DEFAULT_LIMIT.load(Ordering::Relaxed)
}

/// Sets the process-wide default page size used by [`PageConfig::new`].
///
/// Non-positive values are ignored, leaving the current default in place.
pub fn set_default_limit(limit: i64) {
    if limit > 0 {
        DEFAULT_LIMIT.store(limit, Ordering::Relaxed);
    }
}

/// Resolved pagination parameters for a single page-fetch request.
///
/// Immutable once constructed: options consume and return the
/// configuration, so a value handed to a paginator can no longer change.
///
/// ## Example
///
/// ```rust
/// use folio_core::PageConfig;
///
/// let config = PageConfig::new().with_page(2).with_limit(10);
/// assert_eq!(config.offset(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    page: i64,
    limit: i64,
    order: Vec<String>,
}

impl PageConfig {
    /// Creates a configuration for the first page with the process-wide
    /// default page size and no ordering.
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: default_limit(),
            order: Vec::new(),
        }
    }

    /// Returns a configuration with the given page number.
    ///
    /// Values below 1 are ignored, keeping the previously configured page.
    #[inline]
    pub fn with_page(mut self, page: i64) -> Self {
        if page > 0 {
            self.page = page;
        }
        self
    }

    /// Returns a configuration with the given page size.
    ///
    /// Values below 1 are ignored, keeping the previously configured limit.
    #[inline]
    pub fn with_limit(mut self, limit: i64) -> Self {
        if limit > 0 {
            self.limit = limit;
        }
        self
    }

    /// Returns a configuration with the given order clauses.
    ///
    /// Unlike the other options this one replaces: the order list becomes
    /// the subsequence of `clauses` that are non-empty after trimming, so
    /// an all-empty input clears any previously configured ordering.
    pub fn with_order<I, S>(mut self, clauses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.order = clauses
            .into_iter()
            .filter_map(|clause| {
                let clause = clause.as_ref().trim();
                (!clause.is_empty()).then(|| clause.to_owned())
            })
            .collect();
        self
    }

    /// Returns the configured page number (1-based).
    #[inline]
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Returns the configured page size.
    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Returns the configured order clauses, primary clause first.
    #[inline]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Returns the number of records to skip before the page begins.
    ///
    /// Page and limit are at least 1 by construction, so the offset is
    /// never negative.
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new() {
        let config = PageConfig::new();
        assert_eq!(config.page(), 1);
        assert!(config.order().is_empty());
        assert_eq!(config.offset(), 0);
    }

    #[test]
    fn config_with_page() {
        let config = PageConfig::new().with_page(3).with_limit(10);
        assert_eq!(config.page(), 3);
        assert_eq!(config.offset(), 20);
    }

    #[test]
    fn config_invalid_page_is_ignored() {
        let config = PageConfig::new().with_page(2).with_page(0).with_page(-7);
        assert_eq!(config.page(), 2);
    }

    #[test]
    fn config_invalid_limit_is_ignored() {
        let config = PageConfig::new().with_limit(10).with_limit(0).with_limit(-1);
        assert_eq!(config.limit(), 10);
    }

    #[test]
    fn config_order_filters_blank_clauses() {
        let config = PageConfig::new().with_order(["name DESC", "  ", "", " id "]);
        assert_eq!(config.order(), ["name DESC", "id"]);
    }

    #[test]
    fn config_order_replaces_instead_of_merging() {
        let config = PageConfig::new()
            .with_order(["name DESC"])
            .with_order(Vec::<String>::new());
        assert!(config.order().is_empty());
    }

    #[test]
    fn config_offset_arithmetic() {
        let config = PageConfig::new().with_page(5).with_limit(2);
        assert_eq!(config.offset(), 8);

        let config = PageConfig::new().with_page(1).with_limit(50);
        assert_eq!(config.offset(), 0);
    }

    #[test]
    fn default_limit_is_mutable() {
        assert_eq!(default_limit(), 20);
        assert_eq!(PageConfig::new().limit(), 20);

        set_default_limit(25);
        assert_eq!(PageConfig::new().limit(), 25);

        // Non-positive values leave the default untouched.
        set_default_limit(0);
        assert_eq!(default_limit(), 25);

        set_default_limit(20);
    }
}
