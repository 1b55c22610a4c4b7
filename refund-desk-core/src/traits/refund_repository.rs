//! Refund request persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{NewRefundRequest, RefundRequest, RefundStatus};

/// Refund request repository Trait
///
/// Ids are assigned by the repository, sequentially from 1. Lists are
/// returned newest first (`created_at` descending, ties broken by higher id).
///
/// Platform implementation:
/// - `MemoryRefundRepository` (refund-desk-app)
#[async_trait]
pub trait RefundRepository: Send + Sync {
    /// Store a new request and return it with its id
    async fn save(&self, request: NewRefundRequest) -> CoreResult<RefundRequest>;

    /// Get request by ID
    async fn find_by_id(&self, id: u64) -> CoreResult<Option<RefundRequest>>;

    /// All requests owned by a user, newest first
    async fn find_by_user(&self, user_id: u64) -> CoreResult<Vec<RefundRequest>>;

    /// The user's most recent request
    async fn last_for_user(&self, user_id: u64) -> CoreResult<Option<RefundRequest>>;

    /// All requests, newest first
    async fn find_all(&self) -> CoreResult<Vec<RefundRequest>>;

    /// Requests with the given ids; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[u64]) -> CoreResult<Vec<RefundRequest>>;

    /// Set the status of the given requests and bump `updated_at`
    ///
    /// Returns the updated requests; unknown ids are skipped.
    async fn update_status(
        &self,
        ids: &[u64],
        status: RefundStatus,
    ) -> CoreResult<Vec<RefundRequest>>;
}
