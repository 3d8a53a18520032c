use crate::models::{AccountId, Balance};
use rust_decimal::Decimal;

/// A store that can open atomic units of work over account balances.
pub trait LedgerStore: super::Repository {
    /// The unit of work handed out by [`LedgerStore::begin`]. It owns its
    /// connection, so it can outlive the call that opened it.
    type Unit: UnitOfWork<Error = Self::Error> + 'static;

    /// Open a unit of work.
    ///
    /// This may wait for other units to finish, up to a backend-defined
    /// timeout, after which it fails.
    fn begin(&self) -> impl Future<Output = Result<Self::Unit, Self::Error>> + Send;
}

/// A group of balance reads and writes applied as a whole or not at all.
///
/// Rows read through [`UnitOfWork::get_balance`] stay exclusively held until
/// the unit commits or rolls back, so callers must lock in a consistent order
/// (ascending [`AccountId`]) to stay deadlock free. Dropping a unit without
/// committing rolls it back.
pub trait UnitOfWork: Send {
    /// The backend's error type
    type Error;

    /// Take exclusive access to an account row and read its balance.
    ///
    /// Returns Option::None if the account does not exist.
    fn get_balance(
        &mut self,
        account_id: AccountId,
    ) -> impl Future<Output = Result<Option<Balance>, Self::Error>> + Send;

    /// Add a signed `delta` to an account's balance.
    ///
    /// # Returns
    ///
    /// - Ok(Some(balance)) with the new balance
    /// - Ok(None) if the account does not exist or the result would not be a
    ///   valid balance (negative or out of range); nothing is written
    /// - Err otherwise
    fn apply_delta(
        &mut self,
        account_id: AccountId,
        delta: Decimal,
    ) -> impl Future<Output = Result<Option<Balance>, Self::Error>> + Send;

    /// Make every change of this unit visible at once.
    fn commit(self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Discard every change of this unit.
    fn rollback(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
