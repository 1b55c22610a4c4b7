//! Wire and configuration types for the IBAN lookup API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default IBAN lookup endpoint (API Ninjas).
pub const DEFAULT_IBAN_ENDPOINT: &str = "https://api.api-ninjas.com/v1/iban";

/// Decoded lookup response.
///
/// Only `valid` and `country` drive validation; the remaining fields are kept
/// for callers that want to show bank details. Unknown fields are ignored and
/// a missing `valid` flag reads as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbanLookup {
    /// Whether the number passed the provider's checks.
    #[serde(default)]
    pub valid: bool,
    /// Two-letter country code the IBAN belongs to (present when valid).
    #[serde(default)]
    pub country: Option<String>,
    /// IBAN as echoed back by the provider.
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bban: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
}

impl IbanLookup {
    /// Lookup result for a valid IBAN from `country`.
    #[must_use]
    pub fn valid_in(country: impl Into<String>) -> Self {
        Self {
            valid: true,
            country: Some(country.into()),
            ..Self::default()
        }
    }

    /// Lookup result for a number the provider rejected.
    #[must_use]
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// Connection settings for the lookup client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbanClientConfig {
    /// Value sent in the `X-Api-Key` header.
    pub api_key: String,
    /// Lookup endpoint; the IBAN is appended as the `iban` query parameter.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Optional overall request timeout. `None` keeps the transport defaults.
    #[serde(default, with = "option_secs")]
    pub timeout: Option<Duration>,
}

fn default_endpoint() -> String {
    DEFAULT_IBAN_ENDPOINT.to_string()
}

impl IbanClientConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: default_endpoint(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// `Option<Duration>` as whole seconds.
mod option_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_unknown_fields() {
        let json = r#"{"iban":"DE89370400440532013000","valid":true,"country":"DE","bank_name":"Commerzbank","extra":1}"#;
        let lookup: IbanLookup = serde_json::from_str(json).unwrap_or_default();
        assert!(lookup.valid);
        assert_eq!(lookup.country.as_deref(), Some("DE"));
        assert_eq!(lookup.bank_name.as_deref(), Some("Commerzbank"));
    }

    #[test]
    fn missing_valid_reads_as_false() {
        let lookup: IbanLookup =
            serde_json::from_str(r#"{"country":"DE"}"#).unwrap_or_else(|_| IbanLookup::valid_in("XX"));
        assert!(!lookup.valid);
    }

    #[test]
    fn config_defaults() {
        let config: IbanClientConfig = serde_json::from_str(r#"{"api_key":"k"}"#)
            .unwrap_or_else(|_| IbanClientConfig::new("wrong"));
        assert_eq!(config.api_key, "k");
        assert_eq!(config.endpoint, DEFAULT_IBAN_ENDPOINT);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn config_timeout_in_seconds() {
        let config: IbanClientConfig =
            serde_json::from_str(r#"{"api_key":"k","timeout":5}"#)
                .unwrap_or_else(|_| IbanClientConfig::new("wrong"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
