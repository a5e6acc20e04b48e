use actix_web::{get, http::Method, http::StatusCode, post, web, HttpResponse, Responder};

use crate::{
    api::{
        handlers::{error_response, store_failure},
        state::AppState,
    },
    logic::catalog::CropLookup,
    models::request::{
        link, links, ApiResponse, CropApiResponse, CropListResponse, ErrorResponse,
        PaginatedResponse, ReloadApiResponse, ReloadSummary,
    },
};

fn catalog_not_loaded() -> HttpResponse {
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        "Crop catalog is not loaded yet.",
    )
}

/// GET /api/crops
/// Returns every crop in the loaded catalog.
#[utoipa::path(
    get,
    path = "/api/crops",
    tag = "crops",
    responses(
        (status = 200, description = "The crop catalog", body = CropListResponse),
        (status = 503, description = "Catalog not loaded yet", body = ErrorResponse),
    )
)]
#[get("/crops")]
pub async fn list_crops(state: web::Data<AppState>) -> impl Responder {
    let Some(crops) = state.catalog.crops() else {
        return catalog_not_loaded();
    };
    HttpResponse::Ok().json(PaginatedResponse::single_page(
        crops,
        links([
            ("self", link("/api/crops", Method::GET)),
            ("reload", link("/api/crops/reload", Method::POST)),
        ]),
    ))
}

/// GET /api/crops/{name}
/// Returns a single crop by its name.
#[utoipa::path(
    get,
    path = "/api/crops/{name}",
    tag = "crops",
    params(("name" = String, Path, description = "Crop name, e.g. Carrot")),
    responses(
        (status = 200, description = "The crop", body = CropApiResponse),
        (status = 404, description = "Unknown crop", body = ErrorResponse),
        (status = 503, description = "Catalog not loaded yet", body = ErrorResponse),
    )
)]
#[get("/crops/{name}")]
pub async fn get_crop(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let name = path.into_inner();
    if !state.catalog.is_ready() {
        return catalog_not_loaded();
    }
    match state.catalog.get_by_name(&name) {
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Crop '{name}' not found."),
        ),
        Some(crop) => HttpResponse::Ok().json(ApiResponse::new(
            crop,
            links([
                ("self", link(format!("/api/crops/{name}"), Method::GET)),
                ("collection", link("/api/crops", Method::GET)),
            ]),
        )),
    }
}

/// POST /api/crops/reload
/// Re-reads the crop catalog from the document store.
#[utoipa::path(
    post,
    path = "/api/crops/reload",
    tag = "crops",
    responses(
        (status = 200, description = "Catalog reloaded", body = ReloadApiResponse),
        (status = 502, description = "Document store failure", body = ErrorResponse),
    )
)]
#[post("/crops/reload")]
pub async fn reload_crops(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.load(state.store.as_ref()).await {
        Ok(crops) => HttpResponse::Ok().json(ApiResponse::new(
            ReloadSummary { crops },
            links([("crops", link("/api/crops", Method::GET))]),
        )),
        Err(err) => store_failure(&err),
    }
}
