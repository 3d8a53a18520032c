//! REST API endpoints for accounts.
//!
//! Accounts are opened with a starting balance and are never deleted. Their
//! balance changes through transfers (see the transfer routes) and through
//! the administrative credit below.

use crate::{
    ApiApplication,
    config::AxumConfig,
    error::{ErrorResponse, Failure, failure},
    extract::{Json, Path, Query, blank_as_none},
};
use aide::{
    axum::{
        ApiRouter,
        routing::{get, get_with, post_with},
    },
    transform::TransformOperation,
};
use axum::{Extension, extract::State, http::StatusCode};
use ledger_core::models::{AccountId, AccountRecord};
use rust_decimal::Decimal;
use std::sync::Arc;

mod orders;
use orders::*;

/// Path parameter for account-specific endpoints.
#[derive(serde::Deserialize, schemars::JsonSchema)]
#[schemars(inline)]
struct Id {
    /// The unique identifier of the account
    account_id: AccountId,
}

/// Request body for opening an account.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct CreateAccount {
    /// Display name of the account holder
    name: String,
    /// Contact email, unique across accounts
    email: String,
    /// Starting balance, zero if omitted
    #[serde(default)]
    initial_balance: Decimal,
}

/// Query parameters for listing accounts.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct Page {
    /// How many accounts to skip
    #[serde(default, deserialize_with = "blank_as_none")]
    offset: Option<u64>,
    /// How many accounts to return at most; capped by the server
    #[serde(default, deserialize_with = "blank_as_none")]
    limit: Option<u64>,
}

/// Request body for an administrative credit.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct Credit {
    /// The amount to add, greater than zero
    amount: Decimal,
}

/// Creates a router with account-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(list_accounts::<T>, list_accounts_docs)
                .post_with(create_account::<T>, create_account_docs),
            |route| route.tag("accounts"),
        )
        .api_route_with("/{account_id}", get(get_account::<T>), |route| {
            route.tag("accounts")
        })
        .api_route_with(
            "/{account_id}/credit",
            post_with(credit_account::<T>, credit_account_docs),
            |route| route.tag("accounts").tag("admin"),
        )
        .api_route_with(
            "/{account_id}/orders",
            get_with(list_orders::<T>, list_orders_docs)
                .post_with(place_order::<T>, place_order_docs),
            |route| route.tag("orders"),
        )
}

/// Open an account.
async fn create_account<T: ApiApplication>(
    State(app): State<T>,
    Json(body): Json<CreateAccount>,
) -> Result<(StatusCode, Json<AccountRecord>), Failure> {
    app.registry()
        .create(&body.name, &body.email, body.initial_balance)
        .await
        .map(|account| (StatusCode::CREATED, Json(account)))
        .map_err(failure)
}

fn create_account_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("Open an account")
        .description(
            r#"
            Open an account with a unique email and a non-negative starting
            balance. Returns the account with its assigned id.
            "#,
        )
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description("Blank name, malformed email or negative balance")
        })
        .response_with::<409, Json<ErrorResponse>, _>(|res| {
            res.description("The email is already in use")
        })
}

/// Retrieve an account and its current balance.
///
/// # Returns
///
/// - `200 OK`: The account
/// - `404 Not Found`: Account does not exist
/// - `503 Service Unavailable`: The database could not be reached
async fn get_account<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { account_id }): Path<Id>,
) -> Result<Json<AccountRecord>, Failure> {
    app.registry()
        .get(account_id)
        .await
        .map(Json)
        .map_err(failure)
}

/// List accounts in ascending id order.
async fn list_accounts<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    Query(Page { offset, limit }): Query<Page>,
) -> Result<Json<Vec<AccountRecord>>, Failure> {
    let max = u64::try_from(config.page_limit).unwrap_or(u64::MAX);
    let limit = limit.map_or(max, |limit| limit.min(max));

    app.registry()
        .list(offset.unwrap_or_default(), limit)
        .await
        .map(Json)
        .map_err(failure)
}

fn list_accounts_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("List accounts")
        .description(
            r#"
            A page of accounts by ascending id. `limit` defaults to the server's
            page size and is capped by it; a page past the end is empty. An
            empty `offset=` or `limit=` counts as not given.
            "#,
        )
        .response_with::<400, Json<ErrorResponse>, _>(|res| res.description("A limit of zero or a parameter that is not a number"))
}

/// Add funds to an account.
async fn credit_account<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { account_id }): Path<Id>,
    Json(Credit { amount }): Json<Credit>,
) -> Result<Json<AccountRecord>, Failure> {
    app.registry()
        .credit(account_id, amount)
        .await
        .map(Json)
        .map_err(failure)
}

fn credit_account_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("Credit an account")
        .description(
            r#"
            Administrative deposit. The amount is added atomically, with the same
            locking as a transfer, and the updated account is returned.
            "#,
        )
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description("The amount is not positive")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Account does not exist")
        })
}
