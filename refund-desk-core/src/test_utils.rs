//! Test helper module
//!
//! Mock implementations of the service seams plus factory helpers.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use refund_desk_client::IbanLookupClient;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{
    MemoryValidationCache, RefundRepository, StatusChangeNotifier, UserDirectory,
    ValidationCache,
};
use crate::types::{
    CachedValidation, IbanLookup, NewRefundRequest, RefundForm, RefundRequest, RefundStatus,
    StatusChangeNotification, User,
};

// ===== MockIbanClient =====

/// Lookup client answering from a script, then from a fallback answer.
pub struct MockIbanClient {
    script: Mutex<VecDeque<Option<IbanLookup>>>,
    fallback: Option<IbanLookup>,
    calls: AtomicUsize,
}

impl MockIbanClient {
    /// Always answers `response`
    pub fn returning(response: Option<IbanLookup>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: response,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answers `responses` in order, then `None`
    pub fn scripted(responses: Vec<Option<IbanLookup>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            fallback: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IbanLookupClient for MockIbanClient {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_iban(&self, _iban: &str) -> Option<IbanLookup> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

// ===== FailingValidationCache =====

/// Cache whose every operation fails
pub struct FailingValidationCache;

#[async_trait]
impl ValidationCache for FailingValidationCache {
    async fn get(&self, _key: &str) -> CoreResult<Option<CachedValidation>> {
        Err(CoreError::CacheError("cache offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: &CachedValidation) -> CoreResult<()> {
        Err(CoreError::CacheError("cache offline".to_string()))
    }
}

// ===== MockRefundRepository =====

pub struct MockRefundRepository {
    requests: RwLock<HashMap<u64, RefundRequest>>,
    next_id: AtomicU64,
    /// If Some, save returns this error
    save_error: RwLock<Option<String>>,
}

impl MockRefundRepository {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            save_error: RwLock::new(None),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn count(&self) -> usize {
        self.requests.read().await.len()
    }

    fn newest_first(mut requests: Vec<RefundRequest>) -> Vec<RefundRequest> {
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        requests
    }
}

#[async_trait]
impl RefundRepository for MockRefundRepository {
    async fn save(&self, request: NewRefundRequest) -> CoreResult<RefundRequest> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = request.into_request(id, Utc::now());
        self.requests.write().await.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: u64) -> CoreResult<Option<RefundRequest>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: u64) -> CoreResult<Vec<RefundRequest>> {
        let store = self.requests.read().await;
        Ok(Self::newest_first(
            store
                .values()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn last_for_user(&self, user_id: u64) -> CoreResult<Option<RefundRequest>> {
        Ok(self.find_by_user(user_id).await?.into_iter().next())
    }

    async fn find_all(&self) -> CoreResult<Vec<RefundRequest>> {
        let store = self.requests.read().await;
        Ok(Self::newest_first(store.values().cloned().collect()))
    }

    async fn find_by_ids(&self, ids: &[u64]) -> CoreResult<Vec<RefundRequest>> {
        let store = self.requests.read().await;
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }

    async fn update_status(
        &self,
        ids: &[u64],
        status: RefundStatus,
    ) -> CoreResult<Vec<RefundRequest>> {
        let mut store = self.requests.write().await;
        let now = Utc::now();
        let mut updated = Vec::new();
        for id in ids {
            if let Some(request) = store.get_mut(id) {
                request.status = status;
                request.updated_at = now;
                updated.push(request.clone());
            }
        }
        Ok(updated)
    }
}

// ===== MockNotifier =====

pub struct MockNotifier {
    sent: RwLock<Vec<StatusChangeNotification>>,
    fail: RwLock<bool>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            fail: RwLock::new(false),
        }
    }

    pub async fn sent(&self) -> Vec<StatusChangeNotification> {
        self.sent.read().await.clone()
    }

    pub async fn clear(&self) {
        self.sent.write().await.clear();
    }

    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }
}

#[async_trait]
impl StatusChangeNotifier for MockNotifier {
    async fn notify(&self, notification: &StatusChangeNotification) -> CoreResult<()> {
        if *self.fail.read().await {
            return Err(CoreError::NotificationError("mailbox full".to_string()));
        }
        self.sent.write().await.push(notification.clone());
        Ok(())
    }
}

// ===== MockUserDirectory =====

pub struct MockUserDirectory {
    users: RwLock<HashMap<u64, User>>,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn find_by_id(&self, id: u64) -> CoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

// ===== Factory helpers =====

/// Concrete handles on the mocks behind a test context
pub struct TestHandles {
    pub validation_cache: Arc<MemoryValidationCache>,
    pub refund_repository: Arc<MockRefundRepository>,
    pub status_notifier: Arc<MockNotifier>,
    pub user_directory: Arc<MockUserDirectory>,
}

/// Create a `ServiceContext` around `client` with fresh in-memory mocks
pub fn create_test_context(client: Arc<MockIbanClient>) -> (Arc<ServiceContext>, TestHandles) {
    let handles = TestHandles {
        validation_cache: Arc::new(MemoryValidationCache::new()),
        refund_repository: Arc::new(MockRefundRepository::new()),
        status_notifier: Arc::new(MockNotifier::new()),
        user_directory: Arc::new(MockUserDirectory::new()),
    };
    let ctx = ServiceContext::new(
        handles.validation_cache.clone(),
        client,
        handles.refund_repository.clone(),
        handles.status_notifier.clone(),
        handles.user_directory.clone(),
    );
    (Arc::new(ctx), handles)
}

pub fn test_user(id: u64) -> User {
    User {
        id,
        username: format!("user{id}"),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: format!("user{id}@example.com"),
        phone_number: Some("+48123456789".to_string()),
        is_staff: false,
    }
}

/// A form passing every field check; IBAN from Poland, country `PL`
pub fn valid_form() -> RefundForm {
    RefundForm {
        order_number: Some("ORD-1001".to_string()),
        order_date: Some("2024-03-01".to_string()),
        products: Some("Electric kettle".to_string()),
        reason_choice: Some("Product damaged".to_string()),
        other_reason: None,
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        phone_number: Some("+48123456789".to_string()),
        email: Some("ada@example.com".to_string()),
        address: Some("Main St 1".to_string()),
        postal_code: Some("00-001".to_string()),
        city: Some("Warsaw".to_string()),
        country: Some("PL".to_string()),
        iban: Some("PL10105000997603123456789123".to_string()),
        bank_name: Some("Bank Polski".to_string()),
        account_type: Some("private".to_string()),
    }
}
