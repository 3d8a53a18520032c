#![allow(dead_code)]

use ledger_core::{models::AccountId, ports::Application};
use ledger_sqlite::{Db, config::SqliteConfig};
use rust_decimal::Decimal;
use std::path::Path;

pub struct TestApp(pub Db);

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }
}

impl TestApp {
    /// A fresh in-memory database.
    pub async fn memory() -> anyhow::Result<Self> {
        Ok(Self(Db::open(&SqliteConfig::default()).await?))
    }

    /// A database file inside `dir`, created on first use.
    pub async fn on_disk(dir: &Path) -> anyhow::Result<Self> {
        Self::with_config(SqliteConfig::default(), dir).await
    }

    /// Like [`TestApp::on_disk`], with the remaining settings from `config`.
    pub async fn with_config(config: SqliteConfig, dir: &Path) -> anyhow::Result<Self> {
        let config = SqliteConfig {
            database_path: Some(dir.join("ledger.db")),
            ..config
        };
        Ok(Self(Db::open(&config).await?))
    }

    /// Open an account named `name` with a derived email.
    pub async fn open(&self, name: &str, balance: Decimal) -> anyhow::Result<AccountId> {
        let account = self
            .registry()
            .create(name, &format!("{name}@example.com"), balance)
            .await?;
        Ok(account.id)
    }

    /// Committed balance of an account.
    pub async fn balance(&self, account_id: AccountId) -> anyhow::Result<Decimal> {
        Ok(self.registry().get(account_id).await?.balance.value())
    }
}
