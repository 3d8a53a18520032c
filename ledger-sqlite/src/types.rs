//! Row types for the SQLite implementation.
//!
//! Money is stored as text and ids as plain integers; these rows are decoded
//! with `sqlx` and then checked against the invariants of the core models.

use ledger_core::models::{AccountId, AccountRecord, Amount, OrderId, OrderRecord};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub(crate) struct AccountRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub balance: String,
}

impl TryFrom<AccountRow> for AccountRecord {
    type Error = sqlx::Error;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(AccountRecord {
            id: AccountId(row.id),
            name: row.name,
            email: row.email,
            balance: parse(&row.balance)?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct OrderRow {
    pub id: i64,
    pub product_name: String,
    pub amount: String,
    pub user_id: i64,
}

impl TryFrom<OrderRow> for OrderRecord {
    type Error = sqlx::Error;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(OrderRecord {
            id: OrderId(row.id),
            product_name: row.product_name,
            amount: parse::<Amount>(&row.amount)?,
            user_id: AccountId(row.user_id),
        })
    }
}

/// Read a money column, reporting bad text as a decode error.
pub(crate) fn parse<T>(text: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse().map_err(|err: T::Err| sqlx::Error::Decode(Box::new(err)))
}

/// Convert a row count for `limit`/`offset`, saturating on the (absurd)
/// values that do not fit.
pub(crate) fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
