//! Standalone IBAN check

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

const IBAN_MAX_LEN: usize = 34;
const COUNTRY_MAX_LEN: usize = 100;

/// IBAN check request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbanCheckRequest {
    pub iban: String,
    pub country: String,
}

/// IBAN check result; `error` is `None` for an accepted IBAN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbanCheckResponse {
    pub error: Option<String>,
}

/// Checks an IBAN outside of a refund submission (e.g. while the form is being filled in)
pub struct IbanCheckService {
    ctx: Arc<ServiceContext>,
}

impl IbanCheckService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Validate an (IBAN, country) pair through the cached validator
    ///
    /// Fails with `ValidationError` for missing or over-long input and with
    /// `ServiceUnavailable` when the lookup service gave no answer.
    pub async fn check(&self, request: &IbanCheckRequest) -> CoreResult<IbanCheckResponse> {
        let iban = request.iban.trim();
        let country = request.country.trim();
        check_field("iban", iban, IBAN_MAX_LEN)?;
        check_field("country", country, COUNTRY_MAX_LEN)?;

        let error = self.ctx.iban_validator().get_error(iban, country).await?;
        Ok(IbanCheckResponse { error })
    }
}

fn check_field(name: &str, value: &str, max_len: usize) -> CoreResult<()> {
    if value.is_empty() {
        return Err(CoreError::ValidationError(format!("{name}: This field is required.")));
    }
    if value.chars().count() > max_len {
        return Err(CoreError::ValidationError(format!(
            "{name}: Ensure this value has at most {max_len} characters."
        )));
    }
    Ok(())
}
