use std::sync::Arc;

use crate::logic::catalog::CropCatalog;
use crate::services::GardenService;
use crate::store::DocumentStore;

/// Shared handles every handler receives through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub catalog: Arc<CropCatalog>,
    pub gardens: GardenService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: Arc<CropCatalog>) -> Self {
        let gardens = GardenService::new(Arc::clone(&store), Arc::clone(&catalog));
        Self {
            store,
            catalog,
            gardens,
        }
    }
}
