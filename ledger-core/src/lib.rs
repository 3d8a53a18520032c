#![warn(missing_docs)]
//! Core of the account ledger.
//!
//! The crate follows a hexagonal layout: [`models`] holds the plain data
//! types, [`ports`] declares the contracts a storage backend has to fulfil,
//! and the two services built on top of those ports, [`TransferEngine`] and
//! [`AccountRegistry`], carry the domain rules. Nothing in here knows about
//! SQL or HTTP.

/// Domain data types.
///
/// Identifiers, money and the account, order and transfer records. These
/// are plain values with constructors that enforce their invariants
/// (non-negative balances, positive amounts, non-blank names).
pub mod models;

/// Interface traits between the domain services and a storage backend.
///
/// A backend implements [`ports::AccountRepository`], [`ports::OrderRepository`]
/// and [`ports::LedgerStore`]; the blanket [`ports::LedgerRepository`] marker
/// then makes it usable by every service in this crate.
pub mod ports;

mod engine;
mod error;
mod registry;

pub use engine::TransferEngine;
pub use error::{ErrorKind, LedgerError};
pub use registry::AccountRegistry;
