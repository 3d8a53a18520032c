//! Configuration types for the SQLite database connection.
//!
//! This module provides configuration options for establishing and managing
//! SQLite database connections, including how long a caller may wait for the
//! single writer connection before a unit of work gives up.

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Configuration for SQLite database connections.
///
/// # Examples
///
/// ```
/// use ledger_sqlite::config::SqliteConfig;
/// use std::{path::PathBuf, time::Duration};
///
/// // In-memory database (default)
/// let config = SqliteConfig::default();
///
/// // File-based database
/// let config = SqliteConfig {
///     database_path: Some(PathBuf::from("ledger.db")),
///     busy_timeout: Duration::from_secs(2),
///     ..SqliteConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Database file path. If None, uses in-memory database
    pub database_path: Option<PathBuf>,

    /// Whether to create the database if it doesn't exist
    pub create_if_missing: bool,

    /// How long a statement waits on SQLite's write lock
    #[serde(with = "humantime_serde")]
    pub busy_timeout: Duration,

    /// How long a unit of work waits for a pooled connection
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: true,
            busy_timeout: Duration::from_secs(5),
            acquire_timeout: Duration::from_secs(10),
        }
    }
}
