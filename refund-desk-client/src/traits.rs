use async_trait::async_trait;

use crate::types::IbanLookup;

/// IBAN lookup client trait
///
/// One best-effort call per invocation: no retries, no raised faults.
/// Transport failures, error statuses and unreadable bodies are logged by the
/// implementation and reported as `None` ("no result").
#[async_trait]
pub trait IbanLookupClient: Send + Sync {
    /// Client identifier (used in logs)
    fn id(&self) -> &'static str;

    /// Look up an IBAN.
    ///
    /// # Returns
    /// * `Some(lookup)` - the provider answered with a decodable result
    /// * `None` - the provider could not be reached or answered with something unusable
    async fn validate_iban(&self, iban: &str) -> Option<IbanLookup>;
}
