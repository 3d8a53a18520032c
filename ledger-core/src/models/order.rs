use super::{AccountId, Amount, InvalidInput, OrderId, input::non_blank};
use rust_decimal::Decimal;

/// A purchase recorded against an account.
///
/// Orders are history only: placing one does not touch the balance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderRecord {
    /// Store-assigned id
    pub id: OrderId,
    /// What was ordered
    pub product_name: String,
    /// Price paid
    pub amount: Amount,
    /// The account the order belongs to
    pub user_id: AccountId,
}

/// A validated order waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    user_id: AccountId,
    product_name: String,
    amount: Amount,
}

impl NewOrder {
    /// Validate an order for `user_id`.
    pub fn new(user_id: AccountId, product_name: &str, amount: Decimal) -> Result<Self, InvalidInput> {
        Ok(Self {
            user_id,
            product_name: non_blank(product_name).ok_or(InvalidInput::BlankProductName)?,
            amount: Amount::new(amount)?,
        })
    }

    /// The ordering account
    pub fn user_id(&self) -> AccountId {
        self.user_id
    }

    /// What was ordered
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Price paid
    pub fn amount(&self) -> Amount {
        self.amount
    }
}
