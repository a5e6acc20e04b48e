use std::sync::Arc;

use log::{info, warn};
use tokio::task::JoinSet;

use crate::logic::{
    catalog::CropCatalog,
    reconcile::{reconcile, Reconciliation},
};
use crate::models::garden::{Garden, GardenPreview, TileRecord};
use crate::services::{error::ServiceError, session::Session};
use crate::store::{paths, validate_id, Document, DocumentStore};

/// Scale used when a garden document has none, or a non-positive one.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Largest width or height accepted from a garden document.
pub const MAX_DIMENSION: usize = 10_000;

/// Loads gardens from the store and reconciles their tiles against the catalog.
#[derive(Clone)]
pub struct GardenService {
    store: Arc<dyn DocumentStore>,
    catalog: Arc<CropCatalog>,
}

impl GardenService {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: Arc<CropCatalog>) -> Self {
        Self { store, catalog }
    }

    /// Returns `Ok(None)` for anonymous callers.
    pub async fn get_garden(
        &self,
        session: &Session,
        garden_id: &str,
    ) -> Result<Option<Garden>, ServiceError> {
        let Some(uid) = session.user_id() else {
            return Ok(None);
        };
        self.load_garden(uid, garden_id).await.map(Some)
    }

    /// Loads every garden of the caller concurrently, in collection order.
    pub async fn get_gardens(&self, session: &Session) -> Result<Option<Vec<Garden>>, ServiceError> {
        let Some(uid) = session.user_id() else {
            return Ok(None);
        };
        let docs = self
            .store
            .fetch_collection(&paths::user_gardens(validate_id(uid)?))
            .await?;

        let mut tasks = JoinSet::new();
        for (position, doc) in docs.into_iter().enumerate() {
            let service = self.clone();
            let uid = uid.to_string();
            tasks.spawn(async move { (position, service.load_garden(&uid, &doc.id).await) });
        }

        let mut loaded = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (position, result) = joined?;
            match result {
                Ok(garden) => loaded.push((position, garden)),
                // Deleted between listing and loading.
                Err(ServiceError::GardenNotFound(id)) => {
                    warn!("Garden '{id}' disappeared while loading gardens of '{uid}'");
                }
                Err(err) => return Err(err),
            }
        }
        loaded.sort_by_key(|(position, _)| *position);
        Ok(Some(loaded.into_iter().map(|(_, garden)| garden).collect()))
    }

    /// Id and name of each of the caller's gardens, without tiles.
    pub async fn list_gardens(
        &self,
        session: &Session,
    ) -> Result<Option<Vec<GardenPreview>>, ServiceError> {
        let Some(uid) = session.user_id() else {
            return Ok(None);
        };
        let docs = self
            .store
            .fetch_collection(&paths::user_gardens(validate_id(uid)?))
            .await?;
        Ok(Some(
            docs.iter()
                .map(|doc| GardenPreview {
                    id: doc.id.clone(),
                    name: doc.str_field("name").unwrap_or_default().to_string(),
                })
                .collect(),
        ))
    }

    async fn load_garden(&self, uid: &str, garden_id: &str) -> Result<Garden, ServiceError> {
        let doc = self
            .store
            .fetch_document(&paths::garden(validate_id(uid)?, validate_id(garden_id)?))
            .await?
            .ok_or_else(|| ServiceError::GardenNotFound(garden_id.to_string()))?;

        let width = dimension(garden_id, "width", doc.number_field("width"));
        let height = dimension(garden_id, "height", doc.number_field("height"));
        let scale = match doc.number_field("scale") {
            Some(scale) if scale.is_finite() && scale > 0.0 => scale,
            other => {
                warn!("Garden '{garden_id}' has invalid scale {other:?}, using {DEFAULT_SCALE}");
                DEFAULT_SCALE
            }
        };

        let tiles_path = paths::garden_tiles(uid, garden_id);
        let tile_docs = self.store.fetch_collection(&tiles_path).await?;
        let Reconciliation { tiles, stale } = reconcile(
            width,
            height,
            tile_docs.iter().map(tile_record),
            self.catalog.as_ref(),
        );
        self.prune_stale_tiles(&tiles_path, &stale).await;

        Ok(Garden {
            id: garden_id.to_string(),
            name: doc.str_field("name").unwrap_or_default().to_string(),
            width,
            height,
            scale,
            tiles,
        })
    }

    /// Deletes tile documents left outside the grid by a resize. Failures are
    /// logged only; the next load retries them.
    async fn prune_stale_tiles(&self, tiles_path: &str, stale: &[String]) {
        if stale.is_empty() {
            return;
        }
        let mut pruned = 0;
        for key in stale {
            let path = format!("{tiles_path}/{key}");
            match self.store.delete_document(&path).await {
                Ok(()) => pruned += 1,
                Err(err) => warn!("Could not delete stale tile '{path}': {err}"),
            }
        }
        info!("Pruned {pruned}/{} stale tile(s) under '{tiles_path}'", stale.len());
    }
}

/// Non-finite, negative or oversized values become 0; fractions are truncated.
fn dimension(garden_id: &str, field: &str, value: Option<f64>) -> usize {
    match value {
        Some(v) if v.is_finite() && v > 0.0 && v < (MAX_DIMENSION + 1) as f64 => v as usize,
        Some(v) if v.is_finite() && v > 0.0 => {
            warn!("Garden '{garden_id}' has {field} {v} above {MAX_DIMENSION}, using 0");
            0
        }
        _ => 0,
    }
}

fn tile_record(doc: &Document) -> TileRecord {
    TileRecord {
        key: doc.id.clone(),
        name: doc.str_field("name").map(str::to_string),
        planted: doc.bool_field("planted"),
    }
}
