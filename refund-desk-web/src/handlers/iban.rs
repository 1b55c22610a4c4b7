//! Standalone IBAN check

use actix_web::{HttpResponse, web};
use refund_desk_app::AppState;
use refund_desk_core::CoreError;
use refund_desk_core::services::{IbanCheckRequest, IbanCheckResponse};
use refund_desk_core::types::SERVICE_UNAVAILABLE_MESSAGE;

use crate::error::ApiResult;
use crate::extractors::CurrentUser;

/// `POST /api/iban/validate`
///
/// `200 {"error": null | "..."}`; an unreachable lookup service answers
/// `400 {"error": "Validation service is unavailable."}`.
pub async fn validate(
    state: web::Data<AppState>,
    _user: CurrentUser,
    body: web::Json<IbanCheckRequest>,
) -> ApiResult<HttpResponse> {
    match state.iban_check_service.check(&body).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(CoreError::ServiceUnavailable) => {
            tracing::warn!("IBAN check answered without lookup service");
            Ok(HttpResponse::BadRequest().json(IbanCheckResponse {
                error: Some(SERVICE_UNAVAILABLE_MESSAGE.to_string()),
            }))
        }
        Err(e) => Err(e.into()),
    }
}
