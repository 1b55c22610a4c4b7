//! In-memory `RefundRepository`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use refund_desk_core::error::CoreResult;
use refund_desk_core::traits::RefundRepository;
use refund_desk_core::types::{NewRefundRequest, RefundRequest, RefundStatus};

#[derive(Default)]
struct Store {
    requests: BTreeMap<u64, RefundRequest>,
    last_id: u64,
}

/// Refund requests kept in process memory.
///
/// Ids start at 1 and are never reused. Cloning shares the underlying store.
#[derive(Clone, Default)]
pub struct MemoryRefundRepository {
    store: Arc<RwLock<Store>>,
}

impl MemoryRefundRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first<'a>(requests: impl Iterator<Item = &'a RefundRequest>) -> Vec<RefundRequest> {
        let mut requests: Vec<RefundRequest> = requests.cloned().collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        requests
    }
}

#[async_trait]
impl RefundRepository for MemoryRefundRepository {
    async fn save(&self, request: NewRefundRequest) -> CoreResult<RefundRequest> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let stored = request.into_request(store.last_id, Utc::now());
        store.requests.insert(stored.id, stored.clone());
        log::debug!("Stored refund request #{}", stored.id);
        Ok(stored)
    }

    async fn find_by_id(&self, id: u64) -> CoreResult<Option<RefundRequest>> {
        Ok(self.store.read().await.requests.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: u64) -> CoreResult<Vec<RefundRequest>> {
        let store = self.store.read().await;
        Ok(Self::newest_first(
            store.requests.values().filter(|r| r.user_id == user_id),
        ))
    }

    async fn last_for_user(&self, user_id: u64) -> CoreResult<Option<RefundRequest>> {
        let store = self.store.read().await;
        Ok(store
            .requests
            .values()
            .filter(|r| r.user_id == user_id)
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn find_all(&self) -> CoreResult<Vec<RefundRequest>> {
        let store = self.store.read().await;
        Ok(Self::newest_first(store.requests.values()))
    }

    async fn find_by_ids(&self, ids: &[u64]) -> CoreResult<Vec<RefundRequest>> {
        let store = self.store.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.requests.get(id).cloned())
            .collect())
    }

    async fn update_status(
        &self,
        ids: &[u64],
        status: RefundStatus,
    ) -> CoreResult<Vec<RefundRequest>> {
        let mut store = self.store.write().await;
        let now = Utc::now();
        let mut seen = BTreeSet::new();
        let mut updated = Vec::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(*id) {
                continue;
            }
            if let Some(request) = store.requests.get_mut(id) {
                request.status = status;
                request.updated_at = now;
                updated.push(request.clone());
            }
        }
        Ok(updated)
    }
}
