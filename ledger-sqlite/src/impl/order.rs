use crate::{Db, types::OrderRow};
use ledger_core::{
    models::{AccountId, NewOrder, OrderRecord},
    ports::OrderRepository,
};

impl OrderRepository for Db {
    async fn create_order(&self, order: NewOrder) -> Result<Option<OrderRecord>, Self::Error> {
        let inserted = sqlx::query_as::<_, OrderRow>(
            r#"
            insert into
                orders (product_name, amount, user_id)
            values
                ($1, $2, $3)
            returning
                id, product_name, amount, user_id
            "#,
        )
        .bind(order.product_name())
        .bind(order.amount().to_string())
        .bind(order.user_id().get())
        .fetch_one(&self.writer)
        .await;

        match inserted {
            Ok(row) => Ok(Some(row.try_into()?)),
            // the account does not exist
            Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn list_orders(&self, user_id: AccountId) -> Result<Vec<OrderRecord>, Self::Error> {
        sqlx::query_as::<_, OrderRow>(
            r#"
            select
                id, product_name, amount, user_id
            from
                orders
            where
                user_id = $1
            order by
                id
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.reader)
        .await?
        .into_iter()
        .map(OrderRecord::try_from)
        .collect()
    }
}
