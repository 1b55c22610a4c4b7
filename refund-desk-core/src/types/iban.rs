//! IBAN validation types

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Message for a number the lookup service rejected.
pub const INVALID_IBAN_MESSAGE: &str = "Provided number is not a valid IBAN.";

/// Message carried by [`CoreError::ServiceUnavailable`](crate::CoreError::ServiceUnavailable).
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "Validation service is unavailable.";

/// Prefix of every validation cache key.
const CACHE_KEY_PREFIX: &str = "iban-validation";

/// Message for a valid IBAN issued in another country than the one provided.
#[must_use]
pub fn country_mismatch_message(iban_country: &str, requested_country: &str) -> String {
    format!(
        "Provided IBAN number comes from {iban_country}, while {requested_country} was provided."
    )
}

/// (IBAN, country) pair a validation result is stored under.
///
/// Both parts are trimmed; the country is compared case-insensitively, so
/// `("…", "DE")` and `("…", "de")` share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationKey {
    iban: String,
    country: String,
}

impl ValidationKey {
    #[must_use]
    pub fn new(iban: &str, country: &str) -> Self {
        Self {
            iban: iban.trim().to_string(),
            country: country.trim().to_lowercase(),
        }
    }

    /// Deterministic storage key: `iban-validation:<sha256 hex>`.
    ///
    /// Hashing keeps raw account numbers out of cache stores and file names.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.iban.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.country.as_bytes());
        format!("{CACHE_KEY_PREFIX}:{}", hex::encode(hasher.finalize()))
    }
}

/// Cached result of a validation: `error == None` means the IBAN was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CachedValidation {
    pub error: Option<String>,
}

impl CachedValidation {
    /// Entry for an accepted IBAN.
    #[must_use]
    pub fn valid() -> Self {
        Self { error: None }
    }

    #[must_use]
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
        }
    }
}

impl From<Option<String>> for CachedValidation {
    fn from(error: Option<String>) -> Self {
        Self { error }
    }
}

/// Outcome of validating one (IBAN, country) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The lookup service accepted the IBAN for the requested country.
    Valid,
    /// The IBAN was rejected; the reason is user-facing.
    Invalid(String),
    /// The lookup service could not be reached or gave no usable answer.
    ServiceUnavailable,
}
