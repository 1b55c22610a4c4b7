//! Generic HTTP client tools
//!
//! Shared request/response handling for lookup clients: sending, logging,
//! status checking and JSON decoding. Clients build their own `RequestBuilder`
//! (URL, auth headers) and hand it over here.
//!
//! Every failure is reported as a [`ClientError`]; turning that into
//! "no result" is the caller's decision.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (URL, headers, ...)
    /// * `client_name` - client name (for logging)
    /// * `method_name` - request method name (for logging)
    /// * `log_url` - URL as it may appear in logs (sensitive parts masked)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for any status below 400
    /// * `Err(ClientError::NetworkError | Timeout)` when the request could not be sent
    /// * `Err(ClientError::HttpStatus)` for status 400 and above
    pub async fn execute_request(
        request_builder: RequestBuilder,
        client_name: &str,
        method_name: &str,
        log_url: &str,
    ) -> Result<(u16, String), ClientError> {
        log::debug!("[{client_name}] {method_name} {log_url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    client: client_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ClientError::NetworkError {
                    client: client_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{client_name}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError {
                client: client_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        if status_code >= 400 {
            return Err(ClientError::HttpStatus {
                client: client_name.to_string(),
                status: status_code,
                body: truncate_for_log(&response_text),
            });
        }

        log::debug!(
            "[{client_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ClientError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, client_name: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| ClientError::ParseError {
            client: client_name.to_string(),
            detail: e.to_string(),
        })
    }
}
