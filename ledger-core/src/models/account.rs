use super::{AccountId, Balance, InvalidInput, input::non_blank};
use rust_decimal::Decimal;

/// An account as stored in the ledger.
///
/// The balance is a snapshot taken when the record was read; only a unit of
/// work gives a value that is safe to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountRecord {
    /// Store-assigned id
    pub id: AccountId,
    /// Display name of the account holder
    pub name: String,
    /// Contact email, unique across accounts
    pub email: String,
    /// Funds held by the account
    pub balance: Balance,
}

/// A validated request to open an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    name: String,
    email: String,
    initial_balance: Balance,
}

impl NewAccount {
    /// Validate the registration data.
    ///
    /// Name and email are trimmed; the email is compared as given otherwise.
    pub fn new(name: &str, email: &str, initial_balance: Decimal) -> Result<Self, InvalidInput> {
        let name = non_blank(name).ok_or(InvalidInput::BlankName)?;
        let email = non_blank(email)
            .filter(|email| email.contains('@'))
            .ok_or_else(|| InvalidInput::InvalidEmail(email.to_owned()))?;
        let initial_balance = Balance::new(initial_balance)?;

        Ok(Self {
            name,
            email,
            initial_balance,
        })
    }

    /// Display name of the account holder
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Funds the account opens with
    pub fn initial_balance(&self) -> Balance {
        self.initial_balance
    }
}
