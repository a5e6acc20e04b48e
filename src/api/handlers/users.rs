use actix_web::{get, http::Method, http::StatusCode, web, HttpResponse, Responder};

use crate::{
    api::{
        handlers::{error_response, store_failure},
        state::AppState,
    },
    models::request::{link, links, ApiResponse, ErrorResponse, PublicUserApiResponse},
    services::users::get_public_user,
};

/// GET /api/users/{id}
/// Returns the public profile of a user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Public profile", body = PublicUserApiResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 502, description = "Document store failure", body = ErrorResponse),
    )
)]
#[get("/users/{id}")]
pub async fn get_user(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match get_public_user(state.store.as_ref(), &id).await {
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("User '{id}' not found.")),
        Ok(Some(user)) => HttpResponse::Ok().json(ApiResponse::new(
            user,
            links([("self", link(format!("/api/users/{id}"), Method::GET))]),
        )),
        Err(err) => store_failure(&err),
    }
}
