//! Status change notification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RefundRequest, RefundStatus, User};

/// Who receives a status change notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRecipient {
    pub user_id: u64,
    pub email: String,
    pub first_name: String,
}

impl From<&User> for NotificationRecipient {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
        }
    }
}

/// Message sent to the owner after staff changed the status of a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusChangeNotification {
    pub refund_request_id: u64,
    pub recipient: NotificationRecipient,
    pub new_status: RefundStatus,
    pub subject: String,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl StatusChangeNotification {
    /// Notification for `request`, addressed to the request's contact details.
    ///
    /// `owner` supplies the recipient when known; otherwise the name and email
    /// entered on the request are used.
    #[must_use]
    pub fn for_request(request: &RefundRequest, owner: Option<&User>) -> Self {
        let recipient = owner.map_or_else(
            || NotificationRecipient {
                user_id: request.user_id,
                email: request.email.clone(),
                first_name: request.first_name.clone(),
            },
            NotificationRecipient::from,
        );
        Self {
            refund_request_id: request.id,
            recipient,
            new_status: request.status,
            subject: Self::subject_for(request.id),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn subject_for(id: u64) -> String {
        format!("Status update for refund request #{id}")
    }

    /// Plain text body.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "Dear {},\n\nThe status of your refund request #{} has been changed to {}.\n",
            self.recipient.first_name,
            self.refund_request_id,
            self.new_status.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_names_request() {
        assert_eq!(
            StatusChangeNotification::subject_for(42),
            "Status update for refund request #42"
        );
    }
}
