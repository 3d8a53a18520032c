use crate::{
    Db,
    types::{AccountRow, to_sql_count},
};
use ledger_core::{
    models::{AccountId, AccountRecord, NewAccount},
    ports::{AccountFailure, AccountRepository},
};

impl AccountRepository for Db {
    async fn create_account(
        &self,
        account: NewAccount,
    ) -> Result<Result<AccountRecord, AccountFailure>, Self::Error> {
        let inserted = sqlx::query_as::<_, AccountRow>(
            r#"
            insert into
                accounts (name, email, balance)
            values
                ($1, $2, $3)
            returning
                id, name, email, balance
            "#,
        )
        .bind(account.name())
        .bind(account.email())
        .bind(account.initial_balance().to_string())
        .fetch_one(&self.writer)
        .await;

        match inserted {
            Ok(row) => Ok(Ok(row.try_into()?)),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Ok(Err(
                AccountFailure::DuplicateEmail(account.email().to_owned()),
            )),
            Err(err) => Err(err),
        }
    }

    async fn get_account(&self, account_id: AccountId) -> Result<Option<AccountRecord>, Self::Error> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            select
                id, name, email, balance
            from
                accounts
            where
                id = $1
            "#,
        )
        .bind(account_id.get())
        .fetch_optional(&self.reader)
        .await?
        .map(AccountRecord::try_from)
        .transpose()
    }

    async fn list_accounts(&self, offset: u64, limit: u64) -> Result<Vec<AccountRecord>, Self::Error> {
        sqlx::query_as::<_, AccountRow>(
            r#"
            select
                id, name, email, balance
            from
                accounts
            order by
                id
            limit $1 offset $2
            "#,
        )
        .bind(to_sql_count(limit))
        .bind(to_sql_count(offset))
        .fetch_all(&self.reader)
        .await?
        .into_iter()
        .map(AccountRecord::try_from)
        .collect()
    }
}
