use super::{AccountId, Amount, Balance};
use rust_decimal::Decimal;

/// An unvalidated request to move `amount` from one account to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    /// Account to debit
    pub from: AccountId,
    /// Account to credit
    pub to: AccountId,
    /// Quantity to move; must be positive
    pub amount: Decimal,
}

/// A transfer that passed the checks that need no storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidTransfer {
    pub(crate) from: AccountId,
    pub(crate) to: AccountId,
    pub(crate) amount: Amount,
}

impl ValidTransfer {
    /// Account to debit
    pub fn from(&self) -> AccountId {
        self.from
    }

    /// Account to credit
    pub fn to(&self) -> AccountId {
        self.to
    }

    /// Quantity to move
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Both accounts, in the order their rows must be locked.
    pub fn lock_order(&self) -> [AccountId; 2] {
        if self.from < self.to {
            [self.from, self.to]
        } else {
            [self.to, self.from]
        }
    }
}

/// Balances of both accounts once a transfer has committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferOutcome {
    /// Balance of the debited account
    pub from_balance: Balance,
    /// Balance of the credited account
    pub to_balance: Balance,
}
