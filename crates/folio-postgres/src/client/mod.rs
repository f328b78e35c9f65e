//! PostgreSQL client with connection pooling.
//!
//! This module provides the handle paginated queries run against: a
//! deadpool-backed pool of async connections plus its configuration. Both
//! paths of a paginate call check their connections out of the same pool;
//! the pool is what serializes access to the underlying sessions.

mod pg_client;
mod pg_config;

use deadpool::managed::{Object, Pool};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
pub use pg_client::{PgClient, PgPoolStatus};
pub use pg_config::PgConfig;

/// Type alias for the connection pool used throughout the crate.
pub type ConnectionPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Type alias for a connection object from the pool.
pub type PooledConnection = Object<AsyncDieselConnectionManager<AsyncPgConnection>>;
