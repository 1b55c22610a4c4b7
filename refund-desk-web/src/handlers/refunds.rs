//! Customer refund endpoints

use actix_web::{HttpResponse, web};
use refund_desk_app::AppState;
use refund_desk_core::types::{RefundForm, SubmissionOutcome};
use serde_json::json;

use crate::error::ApiResult;
use crate::extractors::CurrentUser;

/// `GET /api/refunds/initial`
pub async fn initial(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<HttpResponse> {
    let initial = state.refund_service.initial_for_user(&user).await?;
    Ok(HttpResponse::Ok().json(initial))
}

/// `POST /api/refunds`
pub async fn create(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    form: web::Json<RefundForm>,
) -> ApiResult<HttpResponse> {
    match state.refund_service.submit(&user, &form).await? {
        SubmissionOutcome::Rejected(errors) => {
            Ok(HttpResponse::UnprocessableEntity().json(json!({ "errors": errors })))
        }
        SubmissionOutcome::AcceptedUnverified(request)
        | SubmissionOutcome::AcceptedVerified(request) => {
            Ok(HttpResponse::Created().json(request))
        }
    }
}

/// `GET /api/refunds`
pub async fn list(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<HttpResponse> {
    let requests = state.refund_service.list_for_user(&user).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// `GET /api/refunds/{id}`
pub async fn detail(
    state: web::Data<AppState>,
    CurrentUser(user): CurrentUser,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let request = state
        .refund_service
        .get_for_user(&user, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(request))
}
