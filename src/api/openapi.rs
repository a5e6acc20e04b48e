use utoipa::OpenApi;

use crate::models::{
    crop::Crop,
    garden::{Garden, GardenPreview, Tile},
    request::{
        CropApiResponse, CropListResponse, ErrorResponse, GardenApiResponse, GardenListResponse,
        GardenPreviewListResponse, Link, Pagination, PublicUserApiResponse, ReloadApiResponse,
        ReloadSummary,
    },
    user::PublicUser,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cropswap API",
        description = "Garden planner: browse the crop catalog and load gardens as dense tile grids, with tiles orphaned by a resize cleaned up on read.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::crops::list_crops,
        crate::api::handlers::crops::get_crop,
        crate::api::handlers::crops::reload_crops,
        crate::api::handlers::gardens::list_gardens,
        crate::api::handlers::gardens::list_garden_previews,
        crate::api::handlers::gardens::get_garden,
        crate::api::handlers::users::get_user,
    ),
    components(
        schemas(
            // Catalog
            Crop, ReloadSummary,
            // Gardens
            Tile, Garden, GardenPreview,
            // Users
            PublicUser,
            // Shared
            Link, Pagination, ErrorResponse,
            // Concrete response envelopes (via #[aliases])
            CropApiResponse,
            CropListResponse,
            ReloadApiResponse,
            GardenApiResponse,
            GardenListResponse,
            GardenPreviewListResponse,
            PublicUserApiResponse,
        )
    ),
    tags(
        (name = "crops",   description = "Crop catalog — list, lookup by name, reload"),
        (name = "gardens", description = "Gardens of the signed-in user"),
        (name = "users",   description = "Public user profiles"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/crops",
            "/api/crops/{name}",
            "/api/crops/reload",
            "/api/gardens",
            "/api/gardens/previews",
            "/api/gardens/{id}",
            "/api/users/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }
}
