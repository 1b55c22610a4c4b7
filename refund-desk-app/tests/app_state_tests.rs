#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the services it wires up.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use refund_desk_app::adapters::{FileValidationCache, MemoryUserDirectory, NoopNotifier};
use refund_desk_app::AppStateBuilder;
use refund_desk_core::error::{CoreError, CoreResult};
use refund_desk_core::traits::{IbanLookupClient, StatusChangeNotifier, ValidationCache};
use refund_desk_core::types::{
    IbanLookup, RefundForm, StatusChangeNotification, SubmissionOutcome, User,
};

/// Lookup client with a fixed answer that counts its calls.
struct FixedLookupClient {
    answer: Option<IbanLookup>,
    calls: AtomicUsize,
}

impl FixedLookupClient {
    fn new(answer: Option<IbanLookup>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IbanLookupClient for FixedLookupClient {
    fn id(&self) -> &'static str {
        "fixed"
    }

    async fn validate_iban(&self, _iban: &str) -> Option<IbanLookup> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

fn customer() -> User {
    User {
        id: 7,
        username: "grace".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        phone_number: Some("+4930123456".to_string()),
        is_staff: false,
    }
}

fn form() -> RefundForm {
    RefundForm {
        order_number: Some("A-17".to_string()),
        order_date: Some("2024-05-20".to_string()),
        products: Some("Headphones".to_string()),
        reason_choice: Some("Product defective".to_string()),
        first_name: Some("Grace".to_string()),
        last_name: Some("Hopper".to_string()),
        phone_number: Some("+4930123456".to_string()),
        email: Some("grace@example.com".to_string()),
        address: Some("Unter den Linden 1".to_string()),
        postal_code: Some("10117".to_string()),
        city: Some("Berlin".to_string()),
        country: Some("DE".to_string()),
        iban: Some("DE89370400440532013000".to_string()),
        bank_name: Some("Commerzbank".to_string()),
        account_type: Some("private".to_string()),
        ..RefundForm::default()
    }
}

#[test]
fn build_requires_iban_client() {
    let result = AppStateBuilder::new()
        .user_directory(Arc::new(MemoryUserDirectory::default()))
        .build();
    assert!(matches!(result, Err(CoreError::ValidationError(msg)) if msg.contains("iban_client")));
}

#[test]
fn build_requires_user_directory() {
    let result = AppStateBuilder::new()
        .iban_client(FixedLookupClient::new(None))
        .build();
    assert!(
        matches!(result, Err(CoreError::ValidationError(msg)) if msg.contains("user_directory"))
    );
}

#[tokio::test]
async fn defaults_wire_a_working_submission_flow() {
    let client = FixedLookupClient::new(Some(IbanLookup::valid_in("DE")));
    let state = AppStateBuilder::new()
        .iban_client(client.clone())
        .user_directory(Arc::new(MemoryUserDirectory::new([customer()])))
        .build()
        .unwrap();

    let outcome = state.refund_service.submit(&customer(), &form()).await.unwrap();
    assert!(matches!(outcome, SubmissionOutcome::AcceptedVerified(ref r) if r.id == 1));

    // The standalone check shares the cache filled by the submission
    let error = state
        .iban_validator()
        .get_error("DE89370400440532013000", "de")
        .await
        .unwrap();
    assert_eq!(error, None);
    assert_eq!(client.calls(), 1);

    let queue = state.review_service.review_queue().await.unwrap();
    assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn file_cache_survives_app_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let client = FixedLookupClient::new(Some(IbanLookup::valid_in("DE")));

    let first = AppStateBuilder::new()
        .iban_client(client.clone())
        .user_directory(Arc::new(MemoryUserDirectory::default()))
        .validation_cache(Arc::new(FileValidationCache::new(tmp.path())))
        .status_notifier(Arc::new(NoopNotifier))
        .build()
        .unwrap();
    first
        .iban_validator()
        .get_error("DE89370400440532013000", "DE")
        .await
        .unwrap();

    let restarted = AppStateBuilder::new()
        .iban_client(client.clone())
        .user_directory(Arc::new(MemoryUserDirectory::default()))
        .validation_cache(Arc::new(FileValidationCache::new(tmp.path())))
        .build()
        .unwrap();
    let key = refund_desk_core::services::IbanValidator::cache_key("DE89370400440532013000", "DE");
    assert!(restarted.ctx.validation_cache.get(&key).await.unwrap().is_some());
    restarted
        .iban_validator()
        .get_error("DE89370400440532013000", "DE")
        .await
        .unwrap();

    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn unavailable_lookup_still_accepts_submission() {
    let client = FixedLookupClient::new(None);
    let state = AppStateBuilder::new()
        .iban_client(client)
        .user_directory(Arc::new(MemoryUserDirectory::new([customer()])))
        .build()
        .unwrap();

    let outcome = state.refund_service.submit(&customer(), &form()).await.unwrap();
    let SubmissionOutcome::AcceptedUnverified(request) = outcome else {
        panic!("expected an unverified submission");
    };
    assert!(!request.iban_verified);
}

/// Notifier that only counts what it receives.
#[derive(Default)]
struct CountingNotifier {
    sent: AtomicUsize,
}

#[async_trait]
impl StatusChangeNotifier for CountingNotifier {
    async fn notify(&self, _notification: &StatusChangeNotification) -> CoreResult<()> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn repeated_selection_notifies_owner_once() {
    let notifier = Arc::new(CountingNotifier::default());
    let state = AppStateBuilder::new()
        .iban_client(FixedLookupClient::new(None))
        .user_directory(Arc::new(MemoryUserDirectory::new([customer()])))
        .status_notifier(notifier.clone())
        .build()
        .unwrap();
    state.refund_service.submit(&customer(), &form()).await.unwrap();

    let result = state.review_service.approve(&[1, 1, 1]).await.unwrap();

    assert_eq!(result.updated_ids, vec![1]);
    assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
}
