mod account;
mod order;
mod store;

pub use account::{AccountFailure, AccountRepository};
pub use order::OrderRepository;
pub use store::{LedgerStore, UnitOfWork};

use crate::{AccountRegistry, TransferEngine};

/// Base trait shared by every repository port.
///
/// It only fixes the backend's error type, so the services can report
/// storage failures without knowing what the backend is.
pub trait Repository {
    /// The backend's own error type
    type Error: std::error::Error + Send + Sync + 'static;
}

// The "marker" trait used everywhere a full backend is needed, implied by
// implementing all of the ports above.
/// A storage backend that implements every port of the ledger.
pub trait LedgerRepository:
    AccountRepository + OrderRepository + LedgerStore + Clone + Send + Sync + 'static
{
}

impl<T> LedgerRepository for T where
    T: AccountRepository + OrderRepository + LedgerStore + Clone + Send + Sync + 'static
{
}

/// The application context handed to adapters such as the HTTP layer.
///
/// An implementation owns the process-wide store handle; the services are
/// cheap views over it.
pub trait Application {
    /// The storage backend
    type Repository: LedgerRepository;

    /// Access the store handle
    fn database(&self) -> &Self::Repository;

    /// The account registry over this application's store
    fn registry(&self) -> AccountRegistry<Self::Repository> {
        AccountRegistry::new(self.database().clone())
    }

    /// The transfer engine over this application's store
    fn transfers(&self) -> TransferEngine<Self::Repository> {
        TransferEngine::new(self.database().clone())
    }
}
