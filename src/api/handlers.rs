use actix_web::{http::StatusCode, HttpResponse};
use log::{error, warn};

use crate::models::request::ErrorResponse;
use crate::services::ServiceError;
use crate::store::StoreError;

pub mod crops;
pub mod gardens;
pub mod users;

/// Builds the `{ "error": message }` body used by every failing endpoint.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: message.into(),
    })
}

pub fn unauthenticated() -> HttpResponse {
    error_response(StatusCode::UNAUTHORIZED, "Sign in to access your gardens.")
}

pub fn store_failure(err: &StoreError) -> HttpResponse {
    if err.is_caller_error() {
        warn!("Rejected request: {err}");
        return error_response(StatusCode::BAD_REQUEST, err.to_string());
    }
    error!("Document store request failed: {err}");
    error_response(StatusCode::BAD_GATEWAY, err.to_string())
}

pub fn service_failure(err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::GardenNotFound(_) => error_response(StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::Store(store_err) => store_failure(store_err),
        ServiceError::Task(_) => {
            error!("{err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
