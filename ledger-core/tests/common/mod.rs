//! An in-memory ledger store, used to exercise the services without a
//! database. The whole store sits behind one async mutex; a unit of work
//! holds that mutex from `begin` until it is committed or dropped, which
//! mirrors SQLite's single-writer locking.

use ledger_core::{
    models::{
        AccountId, AccountRecord, Balance, NewAccount, NewOrder, OrderId, OrderRecord,
    },
    ports::{
        AccountFailure, AccountRepository, Application, LedgerStore, OrderRepository, Repository,
        UnitOfWork,
    },
};
use rust_decimal::Decimal;
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("simulated commit failure")]
    CommitFailed,
}

#[derive(Default)]
struct State {
    accounts: BTreeMap<AccountId, AccountRecord>,
    orders: Vec<OrderRecord>,
}

#[derive(Clone, Default)]
pub struct MemoryLedger {
    state: Arc<Mutex<State>>,
    fail_commits: Arc<AtomicBool>,
}

impl MemoryLedger {
    /// Make every following commit fail.
    pub fn fail_commits(&self) {
        self.fail_commits.store(true, Ordering::SeqCst);
    }

    /// Current committed balance of an account.
    pub async fn balance(&self, account_id: AccountId) -> Decimal {
        self.state.lock().await.accounts[&account_id].balance.value()
    }

    /// Open an account directly, bypassing validation.
    pub async fn open(&self, name: &str, balance: Decimal) -> AccountId {
        let account = NewAccount::new(name, &format!("{name}@example.com"), balance).unwrap();
        self.create_account(account).await.unwrap().unwrap().id
    }
}

impl Repository for MemoryLedger {
    type Error = MemoryError;
}

impl AccountRepository for MemoryLedger {
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<Result<AccountRecord, AccountFailure>, Self::Error> {
        let mut state = self.state.lock().await;
        if state.accounts.values().any(|a| a.email == account.email()) {
            return Ok(Err(AccountFailure::DuplicateEmail(account.email().to_owned())));
        }

        let id = AccountId(state.accounts.len() as i64 + 1);
        let record = AccountRecord {
            id,
            name: account.name().to_owned(),
            email: account.email().to_owned(),
            balance: account.initial_balance(),
        };
        state.accounts.insert(id, record.clone());
        Ok(Ok(record))
    }

    async fn get_account(&self, account_id: AccountId) -> Result<Option<AccountRecord>, Self::Error> {
        Ok(self.state.lock().await.accounts.get(&account_id).cloned())
    }

    async fn list_accounts(&self, offset: u64, limit: u64) -> Result<Vec<AccountRecord>, Self::Error> {
        Ok(self
            .state
            .lock()
            .await
            .accounts
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

impl OrderRepository for MemoryLedger {
    async fn create_order(&self, order: NewOrder) -> Result<Option<OrderRecord>, Self::Error> {
        let mut state = self.state.lock().await;
        if !state.accounts.contains_key(&order.user_id()) {
            return Ok(None);
        }

        let record = OrderRecord {
            id: OrderId(state.orders.len() as i64 + 1),
            product_name: order.product_name().to_owned(),
            amount: order.amount(),
            user_id: order.user_id(),
        };
        state.orders.push(record.clone());
        Ok(Some(record))
    }

    async fn list_orders(&self, user_id: AccountId) -> Result<Vec<OrderRecord>, Self::Error> {
        Ok(self
            .state
            .lock()
            .await
            .orders
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }
}

pub struct MemoryUnit {
    guard: OwnedMutexGuard<State>,
    staged: BTreeMap<AccountId, Balance>,
    fail_commit: bool,
}

impl LedgerStore for MemoryLedger {
    type Unit = MemoryUnit;

    async fn begin(&self) -> Result<Self::Unit, Self::Error> {
        Ok(MemoryUnit {
            guard: self.state.clone().lock_owned().await,
            staged: BTreeMap::new(),
            fail_commit: self.fail_commits.load(Ordering::SeqCst),
        })
    }
}

impl UnitOfWork for MemoryUnit {
    type Error = MemoryError;

    async fn get_balance(&mut self, account_id: AccountId) -> Result<Option<Balance>, Self::Error> {
        Ok(self
            .staged
            .get(&account_id)
            .copied()
            .or_else(|| self.guard.accounts.get(&account_id).map(|a| a.balance)))
    }

    async fn apply_delta(
        &mut self,
        account_id: AccountId,
        delta: Decimal,
    ) -> Result<Option<Balance>, Self::Error> {
        let next = self
            .get_balance(account_id)
            .await?
            .and_then(|balance| balance.apply(delta));
        if let Some(balance) = next {
            self.staged.insert(account_id, balance);
        }
        Ok(next)
    }

    async fn commit(mut self) -> Result<(), Self::Error> {
        if self.fail_commit {
            return Err(MemoryError::CommitFailed);
        }
        for (account_id, balance) in std::mem::take(&mut self.staged) {
            if let Some(account) = self.guard.accounts.get_mut(&account_id) {
                account.balance = balance;
            }
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct TestApp(pub MemoryLedger);

impl Application for TestApp {
    type Repository = MemoryLedger;

    fn database(&self) -> &Self::Repository {
        &self.0
    }
}
