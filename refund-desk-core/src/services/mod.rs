//! Business logic service layer

mod iban_check_service;
mod iban_validator;
mod refund_review_service;
mod refund_service;

pub use iban_check_service::{IbanCheckRequest, IbanCheckResponse, IbanCheckService};
pub use iban_validator::IbanValidator;
pub use refund_review_service::RefundReviewService;
pub use refund_service::RefundService;

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::traits::{
    IbanLookupClient, RefundRepository, StatusChangeNotifier, UserDirectory, ValidationCache,
};
use crate::types::User;

/// Service context - holds all dependencies
///
/// The platform layer creates this context and injects its store and
/// client implementations.
pub struct ServiceContext {
    /// IBAN validation result store
    pub validation_cache: Arc<dyn ValidationCache>,
    /// External IBAN lookup client
    pub iban_client: Arc<dyn IbanLookupClient>,
    /// Refund request persistence
    pub refund_repository: Arc<dyn RefundRepository>,
    /// Status change notification sink
    pub status_notifier: Arc<dyn StatusChangeNotifier>,
    /// User lookup
    pub user_directory: Arc<dyn UserDirectory>,
}

impl ServiceContext {
    /// Create service context
    #[must_use]
    pub fn new(
        validation_cache: Arc<dyn ValidationCache>,
        iban_client: Arc<dyn IbanLookupClient>,
        refund_repository: Arc<dyn RefundRepository>,
        status_notifier: Arc<dyn StatusChangeNotifier>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            validation_cache,
            iban_client,
            refund_repository,
            status_notifier,
            user_directory,
        }
    }

    /// Validator bound to this context's cache and lookup client
    #[must_use]
    pub fn iban_validator(&self) -> IbanValidator {
        IbanValidator::new(self.validation_cache.clone(), self.iban_client.clone())
    }

    /// Resolve a user id, failing with `UserNotFound`
    pub async fn require_user(&self, user_id: u64) -> CoreResult<User> {
        self.user_directory
            .find_by_id(user_id)
            .await?
            .ok_or(CoreError::UserNotFound(user_id))
    }
}
