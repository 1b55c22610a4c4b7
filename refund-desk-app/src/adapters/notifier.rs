//! Status change notifiers.

use async_trait::async_trait;

use refund_desk_core::error::CoreResult;
use refund_desk_core::traits::StatusChangeNotifier;
use refund_desk_core::types::StatusChangeNotification;

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl StatusChangeNotifier for LogNotifier {
    async fn notify(&self, notification: &StatusChangeNotification) -> CoreResult<()> {
        log::info!(
            "Notification to {} <{}>: {}",
            notification.recipient.first_name,
            notification.recipient.email,
            notification.subject
        );
        log::debug!("Notification body:\n{}", notification.body());
        Ok(())
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl StatusChangeNotifier for NoopNotifier {
    async fn notify(&self, _notification: &StatusChangeNotification) -> CoreResult<()> {
        Ok(())
    }
}
