//! HTTP surface of the wardrobe service.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod api;

#[derive(Debug, Serialize)]
/// Body returned with every non-2xx API response.
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Translates a service failure into an HTTP response.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new("Item not found")),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()))
        }
        ServiceError::Internal(_) => {
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("Not found"))
}

/// Registers the `/api` scope together with its JSON extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(api::list_clothes)
            .service(api::create_clothing)
            .service(api::list_clothes_by_season)
            .service(api::list_clothes_by_type)
            .service(api::get_clothing)
            .service(api::update_clothing)
            .service(api::delete_clothing)
            .default_service(web::to(not_found)),
    );
}
