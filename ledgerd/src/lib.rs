#![warn(missing_docs)]
//! The ledger API server: command line, configuration and the concrete
//! application type.

pub mod impls;

mod cli;
pub use cli::Cli;

mod config;
pub use config::AppConfig;
