#![warn(missing_docs)]
//! A SQLite backend for the ledger.
//!
//! [`Db`] implements every port of `ledger-core` on top of `sqlx`. Reads go
//! through a pool of connections; everything that writes goes through a pool
//! holding a single connection, so units of work are serialized in-process
//! before SQLite's own write lock is ever contended.

use sqlx::sqlite;
use std::str::FromStr;
use tokio::{join, try_join};

pub mod config;
mod r#impl;
mod types;

pub use r#impl::SqliteUnit;

use config::SqliteConfig;

/// SQLite database implementation of the ledger repositories.
///
/// # Connection Management
///
/// - `reader`: A connection pool for read operations, allowing concurrent reads
/// - `writer`: A single-connection pool for write operations and units of work
///
/// The handle is cheap to clone; all clones share the same pools. Call
/// [`Db::close`] once at shutdown.
///
/// # Example
///
/// ```no_run
/// # use ledger_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), sqlx::Error> {
/// let db = Db::open(&SqliteConfig::default()).await?;
/// // ...
/// db.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing`
    /// is true) and applies all pending migrations.
    ///
    /// # Database Configuration
    ///
    /// - WAL mode, so that readers never block the writer
    /// - Foreign keys enabled, so orders cannot reference unknown accounts
    /// - `busy_timeout` and `acquire_timeout` from the config bound every wait
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection fails or a migration fails to
    /// apply.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(config.busy_timeout)
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        let reader = sqlite::SqlitePoolOptions::new()
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options.clone());
        // An in-memory database lives only as long as one of its connections,
        // so the writer keeps its connection for the lifetime of the pool.
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        sqlx::migrate!("./schema").run(&writer).await?;

        tracing::debug!(path = ?config.database_path, "database open");

        Ok(Self { reader, writer })
    }

    /// Close both pools, waiting for checked-out connections to be returned.
    ///
    /// Units of work that are still running finish first.
    pub async fn close(&self) {
        join!(self.reader.close(), self.writer.close());
        tracing::debug!("database closed");
    }
}
