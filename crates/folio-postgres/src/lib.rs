#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for database connection operations.
///
/// Use this target for logging connection establishment, pool management,
/// and connection errors.
pub const TRACING_TARGET_CONNECTION: &str = "folio_postgres::connection";

/// Tracing target for paginated query execution.
///
/// Use this target for logging the fetch and count paths of a paginate
/// call and their reconciliation.
pub const TRACING_TARGET_PAGINATE: &str = "folio_postgres::paginate";

mod client;
mod error;
mod paginate;
mod source;

pub use diesel_async::AsyncPgConnection as PgConnection;
pub use folio_core::{
    Page, PageConfig, ParamNames, ParamSource, default_limit, set_default_limit,
};

pub use crate::client::{ConnectionPool, PgClient, PgConfig, PgPoolStatus, PooledConnection};
pub use crate::error::{PgError, PgResult};
pub use crate::paginate::{Paginator, paginate, paginate_related};
pub use crate::source::{PageQuery, PageSource, RelatedSource};
