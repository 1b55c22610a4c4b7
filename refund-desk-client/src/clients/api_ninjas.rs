//! API Ninjas IBAN lookup client
//!
//! Reference: <https://api-ninjas.com/api/iban>

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ClientError, Result};
use crate::http_client::HttpUtils;
use crate::traits::IbanLookupClient;
use crate::types::{IbanClientConfig, IbanLookup};
use crate::utils::log_sanitizer::{mask_iban, truncate_for_log};

const CLIENT_NAME: &str = "api-ninjas";

/// Client for the API Ninjas `/v1/iban` endpoint.
///
/// # Construction
///
/// ```rust,no_run
/// use refund_desk_client::{ApiNinjasClient, IbanClientConfig};
///
/// let client = ApiNinjasClient::new(IbanClientConfig::new("your-api-key")).unwrap();
/// ```
pub struct ApiNinjasClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
}

impl ApiNinjasClient {
    /// Creates a client from connection settings.
    pub fn new(config: IbanClientConfig) -> Result<Self> {
        Ok(Self {
            client: super::create_http_client(config.timeout, CLIENT_NAME)?,
            api_key: config.api_key,
            endpoint: config.endpoint,
        })
    }

    /// Headers sent with every lookup.
    pub fn headers(&self) -> [(&'static str, &str); 1] {
        [("X-Api-Key", self.api_key.as_str())]
    }

    fn lookup_url(&self, iban: &str) -> String {
        format!("{}?iban={}", self.endpoint, urlencoding::encode(iban))
    }

    /// Performs the lookup and decodes the body, keeping the failure reason.
    pub(crate) async fn request_validation(&self, iban: &str) -> Result<IbanLookup> {
        let log_url = self.lookup_url(&mask_iban(iban));

        let mut request = self.client.get(self.lookup_url(iban));
        for (name, value) in self.headers() {
            request = request.header(name, value);
        }

        let (_, body) = HttpUtils::execute_request(request, CLIENT_NAME, "GET", &log_url).await?;

        // An empty object carries no verdict at all; treat it like an unreadable body.
        let value: serde_json::Value = HttpUtils::parse_json(&body, CLIENT_NAME)?;
        if value.as_object().is_none_or(serde_json::Map::is_empty) {
            return Err(ClientError::ParseError {
                client: CLIENT_NAME.to_string(),
                detail: format!("expected a non-empty JSON object, got {}", truncate_for_log(&body)),
            });
        }

        serde_json::from_value(value).map_err(|e| ClientError::ParseError {
            client: CLIENT_NAME.to_string(),
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl IbanLookupClient for ApiNinjasClient {
    fn id(&self) -> &'static str {
        CLIENT_NAME
    }

    async fn validate_iban(&self, iban: &str) -> Option<IbanLookup> {
        let log_url = self.lookup_url(&mask_iban(iban));

        match self.request_validation(iban).await {
            Ok(lookup) => Some(lookup),
            Err(e) if e.is_transport() => {
                log::warn!("IBAN lookup service unreachable at {log_url}: {e}");
                None
            }
            Err(ClientError::HttpStatus { status, body, .. }) => {
                log::error!(
                    "Request to {log_url} failed with status code {status}. Response: {body}"
                );
                None
            }
            Err(ClientError::ParseError { detail, .. }) => {
                log::error!("Error parsing response for request to {log_url}: {detail}");
                None
            }
            Err(e) => {
                log::error!("{e}");
                None
            }
        }
    }
}
