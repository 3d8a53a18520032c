//! The OpenAPI document and the page that renders it.
//!
//! `GET /docs` serves a RapiDoc page, which loads the document from
//! `GET /docs/api.json`.

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

const RAPIDOC: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Ledger API</title>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/rapidoc/9.3.8/rapidoc-min.js" integrity="sha512-0ES6eX4K9J1PrIEjIizv79dTlN5HwI2GW9Ku6ymb8dijMHF5CIplkS8N0iFJ/wl3GybCSqBJu8HDhiFkZRAf0g==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        render-style="focused"
        show-method-in-nav-bar="as-colored-text"
        use-path-in-nav-bar="true"
    ></rapi-doc>
  </body>
</html>"#;

/// Interactive documentation.
async fn rapidoc() -> impl IntoApiResponse {
    Html(RAPIDOC).into_response()
}

/// The OpenAPI document, as JSON.
async fn document(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Documentation routes. They are left out of the document they serve.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(rapidoc))
        .route("/api.json", get(document))
}

/// Configure the OpenAPI documentation metadata.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Ledger API")
        .summary("A REST API for accounts, orders and balance transfers.")
        .description("Balances only change through transfers and administrative credits, each applied atomically. Money is written as decimal strings; requests may use numbers or strings.")
        .version(env!("CARGO_PKG_VERSION"))
        .tag(Tag {
            name: "accounts".into(),
            description: Some("Opening and looking up accounts".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "orders".into(),
            description: Some("The order history of an account".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "transfers".into(),
            description: Some("Moving money between accounts".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "admin".into(),
            description: Some("Operations that change a balance outside of a transfer".into()),
            ..Default::default()
        })
}
