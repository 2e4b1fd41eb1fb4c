//! HTTP handlers exposing the company services as JSON.

use actix_web::{HttpResponse, Responder, get, web};
use chrono::NaiveDateTime;
use serde_json::json;

use crate::services::ServiceError;

pub mod api;

/// Wall-clock reference instant for status evaluation.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Maps service failures onto HTTP status codes.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({"error": "not found"})),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        ServiceError::Repository(_) => HttpResponse::InternalServerError().finish(),
    }
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

/// Registers every route; shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .service(api::api_v1_companies)
            .service(api::api_v1_category_summary)
            .service(api::api_v1_company),
    );
}
