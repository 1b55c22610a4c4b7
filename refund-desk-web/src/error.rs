//! HTTP error type.
//!
//! Every error response is JSON: `{"error": "...", "details": ...}`.
//! Internal failures are logged and reported without details.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use refund_desk_core::CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{message}")]
    Conflict { message: String, ids: Vec<u64> },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<&'a [u64]>,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_expected() {
            tracing::warn!("{err}");
        } else {
            tracing::error!("{err}");
        }

        match err {
            CoreError::ServiceUnavailable => Self::ServiceUnavailable(err.to_string()),
            CoreError::RefundNotFound(_) | CoreError::UserNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            CoreError::PermissionDenied(msg) => Self::Forbidden(msg),
            CoreError::ValidationError(msg) => Self::BadRequest(msg),
            CoreError::StatusConflict { message, ids, .. } => Self::Conflict { message, ids },
            CoreError::CacheError(_)
            | CoreError::StorageError(_)
            | CoreError::SerializationError(_)
            | CoreError::NotificationError(_) => Self::Internal(err.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Unauthorized(msg) => ErrorResponse {
                error: "Unauthorized",
                details: Some(msg.clone()),
                ids: None,
            },
            Self::Forbidden(msg) => ErrorResponse {
                error: "Forbidden",
                details: Some(msg.clone()),
                ids: None,
            },
            Self::NotFound(msg) => ErrorResponse {
                error: "Not found",
                details: Some(msg.clone()),
                ids: None,
            },
            Self::BadRequest(msg) => ErrorResponse {
                error: "Bad request",
                details: Some(msg.clone()),
                ids: None,
            },
            Self::Conflict { message, ids } => ErrorResponse {
                error: "Conflict",
                details: Some(message.clone()),
                ids: Some(ids),
            },
            Self::ServiceUnavailable(msg) => ErrorResponse {
                error: "Service unavailable",
                details: Some(msg.clone()),
                ids: None,
            },
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                ErrorResponse {
                    error: "Internal server error",
                    details: None,
                    ids: None,
                }
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use refund_desk_core::types::RefundStatus;

    #[test]
    fn maps_core_errors_to_status_codes() {
        let cases = [
            (CoreError::RefundNotFound(1), StatusCode::NOT_FOUND),
            (
                CoreError::PermissionDenied("no".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                CoreError::ValidationError("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::StatusConflict {
                    message: "conflict".into(),
                    status: RefundStatus::Rejected,
                    ids: vec![1],
                },
                StatusCode::CONFLICT,
            ),
            (
                CoreError::ServiceUnavailable,
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                CoreError::StorageError("disk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (core, status) in cases {
            assert_eq!(ApiError::from(core).status_code(), status);
        }
    }
}
