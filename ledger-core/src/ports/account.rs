use crate::models::{AccountId, AccountRecord, NewAccount};

/// Why an account could not be inserted, apart from storage errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFailure {
    /// Another account already uses this email
    DuplicateEmail(String),
}

/// Repository interface for account rows.
///
/// These are plain reads and inserts. Balance changes never go through this
/// trait; they need a [`super::UnitOfWork`].
pub trait AccountRepository: super::Repository {
    /// Insert a new account with its initial balance.
    ///
    /// # Returns
    ///
    /// - Ok(Ok(record)) with the store-assigned id on success
    /// - Ok(Err(failure)) if the email is already taken
    /// - Err otherwise
    fn create_account(
        &self,
        account: NewAccount,
    ) -> impl Future<Output = Result<Result<AccountRecord, AccountFailure>, Self::Error>> + Send;

    /// Retrieve an account, returning Option::None if it does not exist.
    fn get_account(
        &self,
        account_id: AccountId,
    ) -> impl Future<Output = Result<Option<AccountRecord>, Self::Error>> + Send;

    /// List accounts by ascending id, skipping `offset` rows and returning at
    /// most `limit`.
    fn list_accounts(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<AccountRecord>, Self::Error>> + Send;
}
