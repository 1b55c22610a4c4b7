//! Application bootstrap for the refund desk.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection) and the storage adapters in [`adapters`].

pub mod adapters;

use std::sync::Arc;

use refund_desk_core::error::{CoreError, CoreResult};
use refund_desk_core::services::{
    IbanCheckService, IbanValidator, RefundReviewService, RefundService, ServiceContext,
};
use refund_desk_core::traits::{
    IbanLookupClient, MemoryValidationCache, RefundRepository, StatusChangeNotifier,
    UserDirectory, ValidationCache,
};

use crate::adapters::{LogNotifier, MemoryRefundRepository};

/// Application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all adapters)
    pub ctx: Arc<ServiceContext>,
    /// Customer-facing refund service
    pub refund_service: RefundService,
    /// Staff review service
    pub review_service: RefundReviewService,
    /// Standalone IBAN check
    pub iban_check_service: IbanCheckService,
}

impl AppState {
    /// Validator sharing the application's cache and lookup client.
    #[must_use]
    pub fn iban_validator(&self) -> IbanValidator {
        self.ctx.iban_validator()
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `iban_client`: external IBAN lookup
/// - `user_directory`: users known to the authentication layer
///
/// # Optional
/// - `validation_cache`: defaults to `MemoryValidationCache` without TTL
/// - `refund_repository`: defaults to `MemoryRefundRepository`
/// - `status_notifier`: defaults to `LogNotifier`
#[derive(Default)]
pub struct AppStateBuilder {
    validation_cache: Option<Arc<dyn ValidationCache>>,
    iban_client: Option<Arc<dyn IbanLookupClient>>,
    refund_repository: Option<Arc<dyn RefundRepository>>,
    status_notifier: Option<Arc<dyn StatusChangeNotifier>>,
    user_directory: Option<Arc<dyn UserDirectory>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn validation_cache(mut self, cache: Arc<dyn ValidationCache>) -> Self {
        self.validation_cache = Some(cache);
        self
    }

    #[must_use]
    pub fn iban_client(mut self, client: Arc<dyn IbanLookupClient>) -> Self {
        self.iban_client = Some(client);
        self
    }

    #[must_use]
    pub fn refund_repository(mut self, repo: Arc<dyn RefundRepository>) -> Self {
        self.refund_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn status_notifier(mut self, notifier: Arc<dyn StatusChangeNotifier>) -> Self {
        self.status_notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn user_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.user_directory = Some(directory);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let iban_client = self
            .iban_client
            .ok_or_else(|| CoreError::ValidationError("iban_client is required".to_string()))?;
        let user_directory = self.user_directory.ok_or_else(|| {
            CoreError::ValidationError("user_directory is required".to_string())
        })?;
        let validation_cache = self
            .validation_cache
            .unwrap_or_else(|| Arc::new(MemoryValidationCache::new()));
        let refund_repository = self
            .refund_repository
            .unwrap_or_else(|| Arc::new(MemoryRefundRepository::new()));
        let status_notifier = self
            .status_notifier
            .unwrap_or_else(|| Arc::new(LogNotifier));

        log::debug!("Building app state with IBAN lookup client '{}'", iban_client.id());

        let ctx = Arc::new(ServiceContext::new(
            validation_cache,
            iban_client,
            refund_repository,
            status_notifier,
            user_directory,
        ));

        Ok(AppState {
            refund_service: RefundService::new(Arc::clone(&ctx)),
            review_service: RefundReviewService::new(Arc::clone(&ctx)),
            iban_check_service: IbanCheckService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}
