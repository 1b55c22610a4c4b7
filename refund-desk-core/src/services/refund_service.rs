//! Refund request submission and customer-facing queries

use std::sync::Arc;

use refund_desk_client::log_sanitizer::mask_iban;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    RefundForm, RefundFormInitial, RefundRequest, SubmissionOutcome, User, ValidationOutcome,
};

/// Refund request service
pub struct RefundService {
    ctx: Arc<ServiceContext>,
}

impl RefundService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Validate and store a refund request for `user`
    ///
    /// The IBAN is checked against the lookup service once both `iban` and
    /// `country` pass field validation:
    /// - rejected: form-level error, nothing stored
    /// - service unavailable: stored with `iban_verified = false`
    /// - accepted: stored with `iban_verified = true`
    pub async fn submit(&self, user: &User, form: &RefundForm) -> CoreResult<SubmissionOutcome> {
        let mut cleaning = form.clean();

        let mut iban_verified = false;
        if let Some((iban, country)) = &cleaning.iban_and_country {
            match self.ctx.iban_validator().validate(iban, country).await {
                ValidationOutcome::Valid => iban_verified = true,
                ValidationOutcome::Invalid(reason) => cleaning.errors.add_non_field(reason),
                ValidationOutcome::ServiceUnavailable => {
                    log::warn!(
                        "Accepting refund request with unverified IBAN {}",
                        mask_iban(iban)
                    );
                }
            }
        }

        let cleaned = match cleaning.cleaned {
            Some(cleaned) if cleaning.errors.is_empty() => cleaned,
            _ => return Ok(SubmissionOutcome::Rejected(cleaning.errors)),
        };

        let request = self
            .ctx
            .refund_repository
            .save(cleaned.into_new_request(user.id, iban_verified))
            .await?;
        log::info!(
            "Refund request #{} submitted by user {} (iban verified: {iban_verified})",
            request.id,
            user.id
        );

        Ok(if iban_verified {
            SubmissionOutcome::AcceptedVerified(request)
        } else {
            SubmissionOutcome::AcceptedUnverified(request)
        })
    }

    /// Defaults for a new refund form
    ///
    /// Contact details come from the user. Address and bank details are
    /// copied from the user's most recent request; if its IBAN was verified,
    /// the validation cache is pre-seeded so resubmitting it needs no lookup.
    pub async fn initial_for_user(&self, user: &User) -> CoreResult<RefundFormInitial> {
        let mut initial = RefundFormInitial {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            ..RefundFormInitial::default()
        };

        if let Some(last) = self.ctx.refund_repository.last_for_user(user.id).await? {
            if last.iban_verified {
                self.ctx
                    .iban_validator()
                    .cache_valid_iban(&last.iban, &last.country)
                    .await;
            }
            initial.address = Some(last.address);
            initial.postal_code = Some(last.postal_code);
            initial.city = Some(last.city);
            initial.country = Some(last.country);
            initial.iban = Some(last.iban);
            initial.bank_name = Some(last.bank_name);
            initial.account_type = Some(last.account_type);
        }

        Ok(initial)
    }

    /// The user's requests, newest first
    pub async fn list_for_user(&self, user: &User) -> CoreResult<Vec<RefundRequest>> {
        self.ctx.refund_repository.find_by_user(user.id).await
    }

    /// A single request, readable by its owner and by staff
    pub async fn get_for_user(&self, user: &User, id: u64) -> CoreResult<RefundRequest> {
        let request = self
            .ctx
            .refund_repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::RefundNotFound(id))?;

        if !user.can_access(request.user_id) {
            return Err(CoreError::PermissionDenied(format!(
                "Refund request #{id} belongs to another user"
            )));
        }
        Ok(request)
    }
}
