use crate::models::{AccountId, Balance, InvalidInput};
use rust_decimal::Decimal;

/// Everything that can go wrong in a ledger operation.
///
/// `E` is the error type of the storage backend. Whatever the variant, the
/// operation has either been rolled back or never started, so no partial
/// effect is ever left behind.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError<E> {
    /// A transfer or credit amount that is zero or negative
    #[error("invalid amount {0}: amounts must be greater than zero")]
    InvalidAmount(Decimal),

    /// Source and destination of a transfer are the same account
    #[error("cannot transfer from an account to itself")]
    SameAccount,

    /// Any other malformed or out-of-range input
    #[error("{0}")]
    Invalid(#[from] InvalidInput),

    /// The account does not exist
    #[error("account {0} does not exist")]
    AccountNotFound(AccountId),

    /// An account already uses this email
    #[error("an account with email \"{0}\" already exists")]
    DuplicateEmail(String),

    /// The source account cannot cover the transfer
    #[error("account {account} has insufficient funds: {required} required, {available} available")]
    InsufficientFunds {
        /// The account that would have been debited
        account: AccountId,
        /// The amount that was asked for
        required: Decimal,
        /// What the account holds
        available: Balance,
    },

    /// The store failed or timed out. The operation did not apply and may be
    /// retried as a whole.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] E),

    /// The task running the unit of work was torn down before it finished,
    /// typically because the runtime is shutting down. The store rolls back
    /// any unit of work that did not commit.
    #[error("the operation was interrupted before it completed")]
    Interrupted,
}

/// Coarse classification of a [`LedgerError`], independent of transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ErrorKind {
    /// Malformed or out-of-range input
    Validation,
    /// A referenced account does not exist
    NotFound,
    /// The request clashes with existing data
    Conflict,
    /// Not enough funds for the transfer
    InsufficientFunds,
    /// Transient storage failure; retry the whole request
    StorageUnavailable,
}

impl<E> LedgerError<E> {
    /// The kind of failure, for callers that translate errors to a protocol.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount(_) | Self::SameAccount | Self::Invalid(_) => ErrorKind::Validation,
            Self::AccountNotFound(_) => ErrorKind::NotFound,
            Self::DuplicateEmail(_) => ErrorKind::Conflict,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::StorageUnavailable(_) | Self::Interrupted => ErrorKind::StorageUnavailable,
        }
    }

    /// Whether retrying the identical request could succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::StorageUnavailable
    }
}
