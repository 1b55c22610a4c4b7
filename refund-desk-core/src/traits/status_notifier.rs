//! Status change notification sink

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::StatusChangeNotification;

/// Delivers status change notifications to request owners
///
/// Platform implementation:
/// - `LogNotifier` / `NoopNotifier` (refund-desk-app)
#[async_trait]
pub trait StatusChangeNotifier: Send + Sync {
    async fn notify(&self, notification: &StatusChangeNotification) -> CoreResult<()>;
}
