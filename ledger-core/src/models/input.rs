use super::{AccountId, MoneyError};

/// Input rejected while constructing a model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    /// Account names cannot be blank
    #[error("account name cannot be empty")]
    BlankName,
    /// The email is blank or has no `@`
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),
    /// Orders need something to have been ordered
    #[error("product name cannot be empty")]
    BlankProductName,
    /// Crediting the account would exceed the largest representable balance
    #[error("crediting account {0} would overflow its balance")]
    BalanceOverflow(AccountId),
    /// Pages hold at least one row
    #[error("page limit must be at least 1")]
    EmptyPage,
    /// A money value broke its invariant
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Trim `value` and reject it if nothing is left.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
