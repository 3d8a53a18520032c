//! Settings of the HTTP server: where it listens and how large a page of
//! `GET /accounts` may get.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// The `[server]` section of the ledger's configuration.
///
/// # Examples
///
/// ```
/// use ledger_axum::config::AxumConfig;
///
/// // Listen on every interface, port 8080, with pages of at most 100 accounts
/// let config = AxumConfig::default();
/// assert_eq!(config.page_limit, 100);
///
/// // A local instance that hands out small pages
/// let config = AxumConfig {
///     bind_address: ([127, 0, 0, 1], 3000).into(),
///     page_limit: 25,
/// };
/// assert_eq!(config.bind_address.port(), 3000);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address the API listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// The largest page `GET /accounts` returns, also used when the request
    /// gives no limit
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
}

fn default_bind_address() -> SocketAddr {
    (Ipv4Addr::UNSPECIFIED, 8080).into()
}

fn default_page_limit() -> usize {
    100
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            page_limit: default_page_limit(),
        }
    }
}
