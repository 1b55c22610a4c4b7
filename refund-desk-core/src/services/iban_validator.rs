//! Cached IBAN validation
//!
//! Wraps the external lookup client with a result cache and the refund
//! desk's acceptance rules. Every attempt reads the cache first; only
//! definitive answers (accepted or rejected) are stored.

use std::sync::Arc;

use refund_desk_client::log_sanitizer::mask_iban;

use crate::error::{CoreError, CoreResult};
use crate::traits::{IbanLookupClient, ValidationCache};
use crate::types::{
    country_mismatch_message, CachedValidation, IbanLookup, ValidationKey, ValidationOutcome,
    INVALID_IBAN_MESSAGE,
};

/// IBAN validator
#[derive(Clone)]
pub struct IbanValidator {
    cache: Arc<dyn ValidationCache>,
    client: Arc<dyn IbanLookupClient>,
}

impl IbanValidator {
    #[must_use]
    pub fn new(cache: Arc<dyn ValidationCache>, client: Arc<dyn IbanLookupClient>) -> Self {
        Self { cache, client }
    }

    /// Deterministic cache key for an (IBAN, country) pair
    #[must_use]
    pub fn cache_key(iban: &str, country: &str) -> String {
        ValidationKey::new(iban, country).cache_key()
    }

    /// Validation error for `iban` claimed to belong to `country`
    ///
    /// # Returns
    /// * `Ok(None)` - accepted
    /// * `Ok(Some(message))` - rejected, with a user-facing reason
    /// * `Err(CoreError::ServiceUnavailable)` - the lookup service gave no answer
    ///
    /// Cache failures are logged and never change the result.
    pub async fn get_error(&self, iban: &str, country: &str) -> CoreResult<Option<String>> {
        let key = Self::cache_key(iban, country);

        if let Some(cached) = self.read_cache(&key).await {
            log::debug!("IBAN validation cache hit for {}", mask_iban(iban));
            return Ok(cached.error);
        }

        let Some(lookup) = self.client.validate_iban(iban.trim()).await else {
            log::warn!(
                "IBAN lookup via {} gave no result for {}",
                self.client.id(),
                mask_iban(iban)
            );
            return Err(CoreError::ServiceUnavailable);
        };

        let error = Self::evaluate(&lookup, country.trim());
        self.write_cache(&key, &CachedValidation::from(error.clone()))
            .await;
        Ok(error)
    }

    /// Three-way wrapper over [`get_error`](Self::get_error)
    pub async fn validate(&self, iban: &str, country: &str) -> ValidationOutcome {
        match self.get_error(iban, country).await {
            Ok(None) => ValidationOutcome::Valid,
            Ok(Some(reason)) => ValidationOutcome::Invalid(reason),
            Err(_) => ValidationOutcome::ServiceUnavailable,
        }
    }

    /// Record `iban` as valid for `country` without asking the lookup service
    ///
    /// Used when a previously verified IBAN is offered again as a form default.
    pub async fn cache_valid_iban(&self, iban: &str, country: &str) {
        let key = Self::cache_key(iban, country);
        self.write_cache(&key, &CachedValidation::valid()).await;
    }

    fn evaluate(lookup: &IbanLookup, requested_country: &str) -> Option<String> {
        if !lookup.valid {
            return Some(INVALID_IBAN_MESSAGE.to_string());
        }

        let iban_country = lookup.country.as_deref().unwrap_or_default();
        if iban_country.to_lowercase() != requested_country.to_lowercase() {
            return Some(country_mismatch_message(iban_country, requested_country));
        }

        None
    }

    async fn read_cache(&self, key: &str) -> Option<CachedValidation> {
        match self.cache.get(key).await {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("Failed to read IBAN validation cache: {e}");
                None
            }
        }
    }

    async fn write_cache(&self, key: &str, value: &CachedValidation) {
        if let Err(e) = self.cache.set(key, value).await {
            log::error!("Failed to write IBAN validation cache: {e}");
        }
    }
}
