//! REST API endpoint for balance transfers.

use crate::{
    ApiApplication,
    error::{ErrorResponse, Failure, failure},
    extract::Json,
};
use aide::{
    axum::{ApiRouter, routing::post_with},
    transform::TransformOperation,
};
use axum::extract::State;
use ledger_core::models::{AccountId, Balance, TransferOutcome, TransferRequest};
use rust_decimal::Decimal;

/// Request body for a transfer.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct Transfer {
    /// The account to debit
    from_user_id: AccountId,
    /// The account to credit
    to_user_id: AccountId,
    /// How much to move, greater than zero
    amount: Decimal,
}

/// The balances of both accounts once the transfer has committed.
#[derive(serde::Serialize, schemars::JsonSchema)]
struct TransferResponse {
    /// Always true; failures are reported with an error status
    success: bool,
    /// Balance of the debited account
    from_balance: Balance,
    /// Balance of the credited account
    to_balance: Balance,
}

impl From<TransferOutcome> for TransferResponse {
    fn from(outcome: TransferOutcome) -> Self {
        Self {
            success: true,
            from_balance: outcome.from_balance,
            to_balance: outcome.to_balance,
        }
    }
}

/// Creates a router with the transfer endpoint.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with(
        "/transfer",
        post_with(transfer::<T>, transfer_docs),
        |route| route.tag("transfers"),
    )
}

/// Move money from one account to another, atomically.
async fn transfer<T: ApiApplication>(
    State(app): State<T>,
    Json(body): Json<Transfer>,
) -> Result<Json<TransferResponse>, Failure> {
    let request = TransferRequest {
        from: body.from_user_id,
        to: body.to_user_id,
        amount: body.amount,
    };

    app.transfers()
        .transfer(request)
        .await
        .map(|outcome| Json(outcome.into()))
        .map_err(failure)
}

fn transfer_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("Transfer funds")
        .description(
            r#"
            Debit one account and credit another in a single atomic step. Either
            both balances change or neither does. Concurrent transfers over the
            same accounts are applied one after another.
            "#,
        )
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description(
                "Malformed body, non-positive amount, identical accounts, or insufficient funds (see `available`)",
            )
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("One of the accounts does not exist")
        })
        .response_with::<503, Json<ErrorResponse>, _>(|res| {
            res.description("The database is busy or unreachable; the transfer did not happen, retry it")
        })
}
