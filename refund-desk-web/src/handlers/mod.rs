//! HTTP handlers and route table

mod admin;
mod health;
mod iban;
mod refunds;

use actix_web::web;

use crate::error::ApiError;

/// Register every route and the JSON body error handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::NotFound(err.to_string()).into()),
    )
    .route("/health", web::get().to(health::health))
    .service(
        web::scope("/api")
            .route("/iban/validate", web::post().to(iban::validate))
            .route("/refunds/initial", web::get().to(refunds::initial))
            .service(
                web::resource("/refunds")
                    .route(web::get().to(refunds::list))
                    .route(web::post().to(refunds::create)),
            )
            .route("/refunds/{id}", web::get().to(refunds::detail))
            .route("/admin/refunds", web::get().to(admin::review_queue))
            .route("/admin/refunds/{action}", web::post().to(admin::change_status)),
    );
}
