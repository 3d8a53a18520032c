//! Repository trait implementations for the SQLite database.

use crate::Db;
use ledger_core::ports::Repository;

mod account;
mod order;
mod store;

pub use store::SqliteUnit;

impl Repository for Db {
    type Error = sqlx::Error;
}
