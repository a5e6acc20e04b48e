use actix_web::{get, http::Method, web, HttpResponse, Responder};

use crate::{
    api::{
        handlers::{service_failure, unauthenticated},
        state::AppState,
    },
    models::request::{
        link, links, ApiResponse, ErrorResponse, GardenApiResponse, GardenListResponse,
        GardenPreviewListResponse, PaginatedResponse,
    },
    services::Session,
};

/// GET /api/gardens
/// Returns every garden of the caller with its reconciled tiles.
#[utoipa::path(
    get,
    path = "/api/gardens",
    tag = "gardens",
    params(("x-user-id" = String, Header, description = "Id of the signed-in user")),
    responses(
        (status = 200, description = "The caller's gardens", body = GardenListResponse),
        (status = 401, description = "No signed-in user", body = ErrorResponse),
        (status = 502, description = "Document store failure", body = ErrorResponse),
    )
)]
#[get("/gardens")]
pub async fn list_gardens(state: web::Data<AppState>, session: Session) -> impl Responder {
    match state.gardens.get_gardens(&session).await {
        Ok(None) => unauthenticated(),
        Ok(Some(gardens)) => HttpResponse::Ok().json(PaginatedResponse::single_page(
            gardens,
            links([
                ("self", link("/api/gardens", Method::GET)),
                ("previews", link("/api/gardens/previews", Method::GET)),
            ]),
        )),
        Err(err) => service_failure(&err),
    }
}

/// GET /api/gardens/previews
/// Returns the id and name of each of the caller's gardens.
#[utoipa::path(
    get,
    path = "/api/gardens/previews",
    tag = "gardens",
    params(("x-user-id" = String, Header, description = "Id of the signed-in user")),
    responses(
        (status = 200, description = "Garden previews", body = GardenPreviewListResponse),
        (status = 401, description = "No signed-in user", body = ErrorResponse),
        (status = 502, description = "Document store failure", body = ErrorResponse),
    )
)]
#[get("/gardens/previews")]
pub async fn list_garden_previews(state: web::Data<AppState>, session: Session) -> impl Responder {
    match state.gardens.list_gardens(&session).await {
        Ok(None) => unauthenticated(),
        Ok(Some(previews)) => HttpResponse::Ok().json(PaginatedResponse::single_page(
            previews,
            links([
                ("self", link("/api/gardens/previews", Method::GET)),
                ("gardens", link("/api/gardens", Method::GET)),
            ]),
        )),
        Err(err) => service_failure(&err),
    }
}

/// GET /api/gardens/{id}
/// Returns one garden. Tiles left outside the grid by a resize are removed from the store.
#[utoipa::path(
    get,
    path = "/api/gardens/{id}",
    tag = "gardens",
    params(
        ("id" = String, Path, description = "Garden id"),
        ("x-user-id" = String, Header, description = "Id of the signed-in user"),
    ),
    responses(
        (status = 200, description = "The garden", body = GardenApiResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 401, description = "No signed-in user", body = ErrorResponse),
        (status = 404, description = "Unknown garden", body = ErrorResponse),
        (status = 502, description = "Document store failure", body = ErrorResponse),
    )
)]
#[get("/gardens/{id}")]
pub async fn get_garden(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    match state.gardens.get_garden(&session, &id).await {
        Ok(None) => unauthenticated(),
        Ok(Some(garden)) => HttpResponse::Ok().json(ApiResponse::new(
            garden,
            links([
                ("self", link(format!("/api/gardens/{id}"), Method::GET)),
                ("collection", link("/api/gardens", Method::GET)),
            ]),
        )),
        Err(err) => service_failure(&err),
    }
}
