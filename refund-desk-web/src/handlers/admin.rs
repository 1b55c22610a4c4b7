//! Staff review endpoints

use actix_web::{HttpResponse, web};
use refund_desk_app::AppState;
use refund_desk_core::types::StatusChangeRequest;

use crate::error::{ApiError, ApiResult};
use crate::extractors::StaffUser;

/// `GET /api/admin/refunds`
pub async fn review_queue(
    state: web::Data<AppState>,
    _staff: StaffUser,
) -> ApiResult<HttpResponse> {
    let queue = state.review_service.review_queue().await?;
    Ok(HttpResponse::Ok().json(queue))
}

/// `POST /api/admin/refunds/{approve|reject|pending}`
pub async fn change_status(
    state: web::Data<AppState>,
    StaffUser(staff): StaffUser,
    action: web::Path<String>,
    body: web::Json<StatusChangeRequest>,
) -> ApiResult<HttpResponse> {
    let service = &state.review_service;
    let result = match action.as_str() {
        "approve" => service.approve(&body.ids).await?,
        "reject" => service.reject(&body.ids).await?,
        "pending" => service.mark_pending(&body.ids).await?,
        other => return Err(ApiError::NotFound(format!("Unknown action '{other}'"))),
    };
    tracing::info!(
        "User {} set {:?} to {}",
        staff.username,
        result.updated_ids,
        result.status
    );
    Ok(HttpResponse::Ok().json(result))
}
