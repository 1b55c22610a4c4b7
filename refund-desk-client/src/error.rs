use serde::{Deserialize, Serialize};

/// Failure of a single lookup request.
///
/// These errors never leave the crate through [`IbanLookupClient`](crate::IbanLookupClient):
/// the client logs them and reports "no result" instead. They are public so that
/// callers driving [`HttpUtils`](crate::HttpUtils) directly can inspect them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// Connection-level failure (DNS resolution, refused connection, TLS, ...).
    NetworkError {
        /// Client that produced the error.
        client: String,
        /// Error details.
        detail: String,
    },

    /// The request did not complete within the configured timeout.
    Timeout {
        /// Client that produced the error.
        client: String,
        /// Error details.
        detail: String,
    },

    /// The remote API answered with a status code of 400 or above.
    HttpStatus {
        /// Client that produced the error.
        client: String,
        /// HTTP status code.
        status: u16,
        /// Response body (truncated for logging).
        body: String,
    },

    /// The response body could not be decoded.
    ParseError {
        /// Client that produced the error.
        client: String,
        /// Details about the parse failure.
        detail: String,
    },
}

impl ClientError {
    /// Whether the failure is caused by the remote side being unreachable,
    /// as opposed to it answering with something unusable.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { client, detail } => {
                write!(f, "[{client}] Network error: {detail}")
            }
            Self::Timeout { client, detail } => {
                write!(f, "[{client}] Request timed out: {detail}")
            }
            Self::HttpStatus {
                client,
                status,
                body,
            } => {
                write!(f, "[{client}] HTTP {status}: {body}")
            }
            Self::ParseError { client, detail } => {
                write!(f, "[{client}] Parse error: {detail}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Result alias for transport-level operations.
pub type Result<T> = std::result::Result<T, ClientError>;
