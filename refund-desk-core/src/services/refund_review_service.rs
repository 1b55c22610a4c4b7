//! Staff review of refund requests

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{RefundRequest, RefundStatus, StatusChangeNotification, StatusChangeResult};

/// Refund review service (staff actions)
pub struct RefundReviewService {
    ctx: Arc<ServiceContext>,
}

impl RefundReviewService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// All requests, pending first, then approved, then rejected; newest first within a status
    pub async fn review_queue(&self) -> CoreResult<Vec<RefundRequest>> {
        let mut requests = self.ctx.refund_repository.find_all().await?;
        requests.sort_by_key(|r| (r.status.queue_rank(), Reverse(r.created_at), Reverse(r.id)));
        Ok(requests)
    }

    /// Approve the selected requests
    ///
    /// Refused as a whole when any of them is rejected.
    pub async fn approve(&self, ids: &[u64]) -> CoreResult<StatusChangeResult> {
        self.change_status(ids, RefundStatus::Approved, Some(RefundStatus::Rejected))
            .await
    }

    /// Reject the selected requests
    ///
    /// Refused as a whole when any of them is approved.
    pub async fn reject(&self, ids: &[u64]) -> CoreResult<StatusChangeResult> {
        self.change_status(ids, RefundStatus::Rejected, Some(RefundStatus::Approved))
            .await
    }

    /// Put the selected requests back to pending
    pub async fn mark_pending(&self, ids: &[u64]) -> CoreResult<StatusChangeResult> {
        self.change_status(ids, RefundStatus::Pending, None).await
    }

    async fn change_status(
        &self,
        ids: &[u64],
        target: RefundStatus,
        blocked_by: Option<RefundStatus>,
    ) -> CoreResult<StatusChangeResult> {
        let selected = self.load_selection(ids).await?;

        if let Some(blocking) = blocked_by {
            let conflicting: Vec<u64> = selected
                .iter()
                .filter(|r| r.status == blocking)
                .map(|r| r.id)
                .collect();
            if !conflicting.is_empty() {
                let message = conflict_message(target, blocking, &conflicting);
                log::warn!("{message}");
                return Err(CoreError::StatusConflict {
                    message,
                    status: blocking,
                    ids: conflicting,
                });
            }
        }

        let to_change: Vec<u64> = selected
            .iter()
            .filter(|r| r.status != target)
            .map(|r| r.id)
            .collect();
        if to_change.is_empty() {
            return Ok(StatusChangeResult {
                status: target,
                updated_ids: Vec::new(),
            });
        }

        let updated = self
            .ctx
            .refund_repository
            .update_status(&to_change, target)
            .await?;
        log::info!(
            "Changed status of {} refund request(s) to {target}",
            updated.len()
        );

        for request in &updated {
            self.notify_owner(request).await;
        }

        Ok(StatusChangeResult {
            status: target,
            updated_ids: updated.iter().map(|r| r.id).collect(),
        })
    }

    async fn load_selection(&self, ids: &[u64]) -> CoreResult<Vec<RefundRequest>> {
        if ids.is_empty() {
            return Err(CoreError::ValidationError(
                "No refund requests selected".to_string(),
            ));
        }

        // Selections are sets; a repeated id changes and notifies once.
        let mut seen = HashSet::new();
        let ids: Vec<u64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let found = self.ctx.refund_repository.find_by_ids(&ids).await?;
        let mut by_id: HashMap<u64, RefundRequest> =
            found.into_iter().map(|r| (r.id, r)).collect();

        let mut selected = Vec::with_capacity(ids.len());
        for id in ids {
            let request = by_id.remove(&id).ok_or(CoreError::RefundNotFound(id))?;
            selected.push(request);
        }
        Ok(selected)
    }

    async fn notify_owner(&self, request: &RefundRequest) {
        let owner = match self.ctx.require_user(request.user_id).await {
            Ok(owner) => Some(owner),
            Err(e) => {
                log::warn!(
                    "Failed to look up owner of refund request #{}: {e}",
                    request.id
                );
                None
            }
        };

        let notification = StatusChangeNotification::for_request(request, owner.as_ref());
        if let Err(e) = self.ctx.status_notifier.notify(&notification).await {
            log::error!(
                "Failed to send status change notification for refund request #{}: {e}",
                request.id
            );
        }
    }
}

fn conflict_message(target: RefundStatus, blocking: RefundStatus, ids: &[u64]) -> String {
    let action = match target {
        RefundStatus::Approved => "approve",
        RefundStatus::Rejected => "reject",
        RefundStatus::Pending => "mark as pending",
    };
    let past = match target {
        RefundStatus::Approved => "approved",
        RefundStatus::Rejected => "rejected",
        RefundStatus::Pending => "pending",
    };
    let ids = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Can't {action} the following refund requests with status '{}': {ids}. \
         If you are sure these should be {past}, assign them 'Pending' status first",
        blocking.label()
    )
}
