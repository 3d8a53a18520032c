#![warn(missing_docs)]
//! The REST API of the ledger.
//!
//! [`router`] builds an axum router (plus its OpenAPI document) over any
//! [`ApiApplication`]; [`start_server`] binds it and serves until the given
//! shutdown signal resolves. Failures are reported with the status codes
//! below, and a JSON [`ErrorResponse`] body.
//!
//! | failure                                    | status |
//! |--------------------------------------------|--------|
//! | invalid input, same account, insufficient funds | 400 |
//! | unknown account                            | 404 |
//! | duplicate email                            | 409 |
//! | storage unavailable                        | 503 |

mod account_routes;
mod error;
mod extract;
mod transfer_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json};
use ledger_core::ports::Application;
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

pub use error::ErrorResponse;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
    service: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
    })
}

/// Every route of the API, without state or documentation.
fn api_router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route("/", get(health_check))
        .api_route("/health", get(health_check))
        .nest("/accounts", account_routes::router())
        .merge(transfer_routes::router())
}

/// Construct a full API router with the given state and config, returning it
/// together with the OpenAPI document it serves.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, OpenApi) {
    let mut api = OpenApi::default();
    let router = api_router::<T>()
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api.clone())))
        .layer(Extension(Arc::new(config)))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    (router, api)
}

/// Starts the HTTP server with the provided configuration.
///
/// The server stops accepting connections once `shutdown` resolves and
/// returns after in-flight requests have completed.
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, config);
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
///
/// If a handler cannot be installed, that signal is ignored rather than
/// ending the wait.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received ctrl+c signal."),
        _ = terminate => tracing::debug!("Received terminate signal."),
    }
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication: Clone + Send + Sync + 'static + Application {}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where T: Application {}
