//! The concrete application wired up by the server binary.

use ledger_core::ports::Application;
use ledger_sqlite::Db;

/// The ledger backed by SQLite.
///
/// Holds the process-wide database handle; everything else is derived from
/// it per request.
#[derive(Clone)]
pub struct LedgerApp {
    /// Database connection for persistent storage
    pub db: Db,
}

impl Application for LedgerApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }
}
