use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use log::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cropswap::{
    api::{openapi::ApiDoc, state::AppState},
    config::AppConfig,
    data::crops::default_store,
    logic::catalog::CropCatalog,
    store::{DocumentStore, MemoryStore},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let store: Arc<dyn DocumentStore> = match &config.seed_file {
        Some(path) => {
            info!("Seeding document store from {}", path.display());
            Arc::new(MemoryStore::from_seed_file(path).map_err(std::io::Error::other)?)
        }
        None => Arc::new(default_store().map_err(std::io::Error::other)?),
    };

    let catalog = Arc::new(CropCatalog::new());
    if let Err(err) = catalog.load(store.as_ref()).await {
        warn!("Starting without a crop catalog ({err}); POST /api/crops/reload to retry");
    }
    let state = web::Data::new(AppState::new(store, catalog));

    let bind_addr = config.bind_addr;
    info!("🌱 Cropswap API started at http://{bind_addr}");
    info!("   GET  /api/crops");
    info!("   GET  /api/crops/{{name}}");
    info!("   POST /api/crops/reload");
    info!("   GET  /api/gardens");
    info!("   GET  /api/gardens/previews");
    info!("   GET  /api/gardens/{{id}}");
    info!("   GET  /api/users/{{id}}");
    info!("   📖 Swagger UI → http://{bind_addr}/swagger-ui/");
    info!("   📌 OpenAPI spec → http://{bind_addr}/api-docs/openapi.json");
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(cropswap::api::routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
