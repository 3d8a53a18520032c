use crate::models::{AccountId, NewOrder, OrderRecord};

/// Repository interface for the order history.
pub trait OrderRepository: super::Repository {
    /// Record an order.
    ///
    /// # Returns
    ///
    /// - Ok(Some(record)) on success
    /// - Ok(None) if the referenced account does not exist
    /// - Err otherwise
    fn create_order(
        &self,
        order: NewOrder,
    ) -> impl Future<Output = Result<Option<OrderRecord>, Self::Error>> + Send;

    /// All orders of an account, by ascending id.
    fn list_orders(
        &self,
        user_id: AccountId,
    ) -> impl Future<Output = Result<Vec<OrderRecord>, Self::Error>> + Send;
}
