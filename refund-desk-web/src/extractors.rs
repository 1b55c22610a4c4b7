//! Request extractors for the authenticated user.
//!
//! Authentication happens in front of this service; the authenticated user id
//! arrives in the `X-User-Id` header and is resolved through the user directory.

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use refund_desk_app::AppState;
use refund_desk_core::types::User;

use crate::error::ApiError;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Any authenticated user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticated staff member
#[derive(Debug, Clone)]
pub struct StaffUser(pub User);

fn user_id(req: &HttpRequest) -> Result<u64, ApiError> {
    let header = req
        .headers()
        .get(USER_ID_HEADER)
        .ok_or_else(|| ApiError::Unauthorized(format!("Missing {USER_ID_HEADER} header")))?;
    header
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| ApiError::Unauthorized(format!("Invalid {USER_ID_HEADER} header")))
}

async fn resolve_user(
    state: Option<web::Data<AppState>>,
    id: Result<u64, ApiError>,
) -> Result<User, ApiError> {
    let id = id?;
    let state = state
        .ok_or_else(|| ApiError::Internal("Application state not configured".to_string()))?;
    state
        .ctx
        .user_directory
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(format!("Unknown user {id}")))
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let id = user_id(req);
        Box::pin(async move { resolve_user(state, id).await.map(CurrentUser) })
    }
}

impl FromRequest for StaffUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let id = user_id(req);
        Box::pin(async move {
            let user = resolve_user(state, id).await?;
            if !user.is_staff {
                return Err(ApiError::Forbidden("Staff access required".to_string()));
            }
            Ok(StaffUser(user))
        })
    }
}
