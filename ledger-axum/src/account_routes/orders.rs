use super::Id;
use crate::{
    ApiApplication,
    error::{ErrorResponse, Failure, failure},
    extract::{Json, Path},
};
use aide::transform::TransformOperation;
use axum::{extract::State, http::StatusCode};
use ledger_core::models::OrderRecord;
use rust_decimal::Decimal;

/// Request body for placing an order.
#[derive(serde::Deserialize, schemars::JsonSchema)]
pub(crate) struct PlaceOrder {
    /// What is being ordered
    product_name: String,
    /// The price, greater than zero
    amount: Decimal,
}

/// Record an order for an account. The balance is left untouched.
pub(crate) async fn place_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { account_id }): Path<Id>,
    Json(order): Json<PlaceOrder>,
) -> Result<(StatusCode, Json<OrderRecord>), Failure> {
    app.registry()
        .place_order(account_id, &order.product_name, order.amount)
        .await
        .map(|order| (StatusCode::CREATED, Json(order)))
        .map_err(failure)
}

pub(crate) fn place_order_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("Place an order")
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description("Blank product name or non-positive amount")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Account does not exist")
        })
}

/// The orders of an account, oldest first.
pub(crate) async fn list_orders<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { account_id }): Path<Id>,
) -> Result<Json<Vec<OrderRecord>>, Failure> {
    app.registry()
        .orders(account_id)
        .await
        .map(Json)
        .map_err(failure)
}

pub(crate) fn list_orders_docs(op: TransformOperation<'_>) -> TransformOperation<'_> {
    op.summary("List orders")
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("Account does not exist")
        })
}
