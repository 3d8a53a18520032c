//! Translation of ledger failures into HTTP responses.

use axum::{Json, http::StatusCode};
use ledger_core::{ErrorKind, LedgerError, models::Balance};
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt::Display;
use tracing::{Level, event};

/// The body of every failed request.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse {
    /// What kind of failure this is
    pub error: ErrorKind,
    /// A human readable reason
    pub message: String,
    /// For insufficient funds, what the source account holds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<Balance>,
}

/// The error half of every handler's result.
pub(crate) type Failure = (StatusCode, Json<ErrorResponse>);

/// The status code for each kind of failure.
pub(crate) fn status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::InsufficientFunds => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Turn a ledger error into a response. Storage failures are logged here and
/// reported to the client without their details.
pub(crate) fn failure<E: Display>(err: LedgerError<E>) -> Failure {
    let kind = err.kind();

    let available = match &err {
        LedgerError::InsufficientFunds { available, .. } => Some(*available),
        _ => None,
    };

    let message = if err.is_retryable() {
        event!(Level::ERROR, err = err.to_string());
        "the ledger is temporarily unavailable, please retry".to_owned()
    } else {
        err.to_string()
    };

    (
        status(kind),
        Json(ErrorResponse {
            error: kind,
            message,
            available,
        }),
    )
}
