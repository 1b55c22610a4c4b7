//! Lookup client implementations

mod api_ninjas;

pub use api_ninjas::ApiNinjasClient;

use std::time::Duration;

use reqwest::Client;

use crate::error::{ClientError, Result};

/// Default connection timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Build the shared reqwest client.
///
/// Only the connect phase is bounded by default; an overall timeout is applied
/// when one is configured.
pub(crate) fn create_http_client(timeout: Option<Duration>, client_name: &str) -> Result<Client> {
    let mut builder =
        Client::builder().connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|e| ClientError::NetworkError {
        client: client_name.to_string(),
        detail: format!("Failed to create HTTP client: {e}"),
    })
}
