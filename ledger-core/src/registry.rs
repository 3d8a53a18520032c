use crate::{
    LedgerError,
    engine::{finish, run_detached},
    models::{
        AccountId, AccountRecord, Amount, Balance, InvalidInput, NewAccount, NewOrder, OrderRecord,
    },
    ports::{AccountFailure, LedgerRepository, UnitOfWork},
};
use rust_decimal::Decimal;
use tracing::{Level, event};

/// Opening, looking up and crediting accounts, plus their order history.
///
/// Reads go straight to the repository. The one balance mutation offered
/// here, [`AccountRegistry::credit`], runs in a unit of work with the same
/// locking rules as a transfer.
#[derive(Debug, Clone)]
pub struct AccountRegistry<R> {
    repository: R,
}

impl<R> AccountRegistry<R> {
    /// Wrap a store handle.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: LedgerRepository> AccountRegistry<R> {
    /// Open an account with a non-negative starting balance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Invalid`] for a blank name, a malformed email or a
    ///   negative balance
    /// - [`LedgerError::DuplicateEmail`] if the email is taken
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        initial_balance: Decimal,
    ) -> Result<AccountRecord, LedgerError<R::Error>> {
        let account = NewAccount::new(name, email, initial_balance)?;

        match self
            .repository
            .create_account(account)
            .await
            .map_err(LedgerError::StorageUnavailable)?
        {
            Ok(record) => {
                event!(Level::INFO, account = %record.id, balance = %record.balance, "account created");
                Ok(record)
            }
            Err(AccountFailure::DuplicateEmail(email)) => Err(LedgerError::DuplicateEmail(email)),
        }
    }

    /// Look up an account.
    pub async fn get(&self, account_id: AccountId) -> Result<AccountRecord, LedgerError<R::Error>> {
        self.repository
            .get_account(account_id)
            .await
            .map_err(LedgerError::StorageUnavailable)?
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    /// A page of accounts in ascending id order. A page past the end is
    /// empty.
    pub async fn list(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<AccountRecord>, LedgerError<R::Error>> {
        if limit == 0 {
            return Err(InvalidInput::EmptyPage.into());
        }

        self.repository
            .list_accounts(offset, limit)
            .await
            .map_err(LedgerError::StorageUnavailable)
    }

    /// Administrative credit: add `amount` to an account.
    ///
    /// Like a transfer, this runs to completion once its unit of work has
    /// been opened, even if the caller goes away, and has no effect if the
    /// caller goes away before that.
    ///
    /// # Returns
    ///
    /// The account with its balance right after the commit.
    pub async fn credit(
        &self,
        account_id: AccountId,
        amount: Decimal,
    ) -> Result<AccountRecord, LedgerError<R::Error>> {
        let amount = Amount::new(amount).map_err(|_| LedgerError::InvalidAmount(amount))?;

        let balance = run_detached(&self.repository, move |mut unit| async move {
            let result = add_funds(&mut unit, account_id, amount).await;
            finish(unit, result).await
        })
        .await?;

        event!(Level::INFO, account = %account_id, amount = %amount, balance = %balance, "account credited");

        let mut record = self.get(account_id).await?;
        record.balance = balance;
        Ok(record)
    }

    /// Record an order against an existing account.
    pub async fn place_order(
        &self,
        user_id: AccountId,
        product_name: &str,
        amount: Decimal,
    ) -> Result<OrderRecord, LedgerError<R::Error>> {
        let order = NewOrder::new(user_id, product_name, amount)?;

        self.repository
            .create_order(order)
            .await
            .map_err(LedgerError::StorageUnavailable)?
            .ok_or(LedgerError::AccountNotFound(user_id))
    }

    /// The order history of an account, oldest first.
    pub async fn orders(&self, user_id: AccountId) -> Result<Vec<OrderRecord>, LedgerError<R::Error>> {
        // distinguish "no orders" from "no account"
        self.get(user_id).await?;

        self.repository
            .list_orders(user_id)
            .await
            .map_err(LedgerError::StorageUnavailable)
    }
}

async fn add_funds<U: UnitOfWork>(
    unit: &mut U,
    account_id: AccountId,
    amount: Amount,
) -> Result<Balance, LedgerError<U::Error>> {
    unit.get_balance(account_id)
        .await
        .map_err(LedgerError::StorageUnavailable)?
        .ok_or(LedgerError::AccountNotFound(account_id))?;

    Ok(unit
        .apply_delta(account_id, amount.value())
        .await
        .map_err(LedgerError::StorageUnavailable)?
        .ok_or(InvalidInput::BalanceOverflow(account_id))?)
}
