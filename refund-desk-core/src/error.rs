//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::{RefundStatus, SERVICE_UNAVAILABLE_MESSAGE};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The external IBAN validation service gave no usable answer.
    ///
    /// Distinct from a rejected IBAN: callers decide whether to block or
    /// soft-accept. Never cached.
    #[error("{}", SERVICE_UNAVAILABLE_MESSAGE)]
    ServiceUnavailable,

    /// Refund request not found
    #[error("Refund request not found: {0}")]
    RefundNotFound(u64),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(u64),

    /// Caller may not access the resource
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Input validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Status change refused because some selected requests are in a conflicting state
    #[error("{message}")]
    StatusConflict {
        message: String,
        status: RefundStatus,
        ids: Vec<u64>,
    },

    /// Cache store error
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Notification could not be delivered
    #[error("Notification error: {0}")]
    NotificationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing resource, unavailable
    /// third party), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable
                | Self::RefundNotFound(_)
                | Self::UserNotFound(_)
                | Self::PermissionDenied(_)
                | Self::ValidationError(_)
                | Self::StatusConflict { .. }
        )
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
