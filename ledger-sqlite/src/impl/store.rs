use crate::{Db, types::parse};
use ledger_core::{
    models::{AccountId, Balance},
    ports::{LedgerStore, UnitOfWork},
};
use rust_decimal::Decimal;
use sqlx::{Sqlite, Transaction};

/// A unit of work over the writer connection.
///
/// Holding one means holding the only writer connection, and after the
/// first [`UnitOfWork::get_balance`] also SQLite's write lock. Dropping it
/// without committing rolls the transaction back.
pub struct SqliteUnit {
    tx: Transaction<'static, Sqlite>,
}

impl LedgerStore for Db {
    type Unit = SqliteUnit;

    async fn begin(&self) -> Result<Self::Unit, Self::Error> {
        Ok(SqliteUnit {
            tx: self.writer.begin().await?,
        })
    }
}

impl UnitOfWork for SqliteUnit {
    type Error = sqlx::Error;

    async fn get_balance(&mut self, account_id: AccountId) -> Result<Option<Balance>, Self::Error> {
        // SQLite has no `select ... for update`. A no-op update takes the
        // database write lock, which then holds until commit or rollback.
        let balance = sqlx::query_scalar::<_, String>(
            r#"
            update
                accounts
            set
                balance = balance
            where
                id = $1
            returning
                balance
            "#,
        )
        .bind(account_id.get())
        .fetch_optional(&mut *self.tx)
        .await?;

        balance.as_deref().map(parse::<Balance>).transpose()
    }

    async fn apply_delta(
        &mut self,
        account_id: AccountId,
        delta: Decimal,
    ) -> Result<Option<Balance>, Self::Error> {
        let Some(next) = self
            .get_balance(account_id)
            .await?
            .and_then(|balance| balance.apply(delta))
        else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            update
                accounts
            set
                balance = $2
            where
                id = $1
            "#,
        )
        .bind(account_id.get())
        .bind(next.to_string())
        .execute(&mut *self.tx)
        .await?;

        Ok(Some(next))
    }

    async fn commit(self) -> Result<(), Self::Error> {
        self.tx.commit().await
    }

    async fn rollback(self) -> Result<(), Self::Error> {
        self.tx.rollback().await
    }
}
