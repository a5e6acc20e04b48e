use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{info, warn};

use crate::models::crop::Crop;
use crate::store::{paths, Document, DocumentStore, StoreError};

/// Anything that can resolve a crop name to its catalog record.
pub trait CropLookup {
    fn get_by_name(&self, name: &str) -> Option<Crop>;

    fn get_color(&self, name: &str) -> Option<String> {
        self.get_by_name(name).map(|c| c.color)
    }
}

/// Name-keyed views over a loaded crop list. Built once from the list and
/// never edited afterwards; a new list means a new index.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    crops: Vec<Crop>,
    by_name: HashMap<String, usize>,
    colors: HashMap<String, String>,
}

impl CatalogIndex {
    /// Later entries win when two crops share a name.
    pub fn build(crops: Vec<Crop>) -> Self {
        let by_name = crops
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        let colors = crops
            .iter()
            .map(|c| (c.name.clone(), c.color.clone()))
            .collect();
        Self {
            crops,
            by_name,
            colors,
        }
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

impl CropLookup for CatalogIndex {
    fn get_by_name(&self, name: &str) -> Option<Crop> {
        self.by_name.get(name).map(|&i| self.crops[i].clone())
    }

    fn get_color(&self, name: &str) -> Option<String> {
        self.colors.get(name).cloned()
    }
}

/// Observable phase of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    Absent,
    Loading,
    Ready,
}

#[derive(Debug, Default)]
enum CatalogState {
    #[default]
    Absent,
    Loading,
    Ready(Arc<CatalogIndex>),
}

/// Crop catalog loaded once from the store, then queried synchronously.
///
/// Readers see either no catalog or a complete one: the index is built from
/// the full batch before it is swapped in.
#[derive(Debug, Default)]
pub struct CropCatalog {
    state: RwLock<CatalogState>,
    /// Number of loads started so far.
    started: AtomicU64,
    /// Generation of the load whose index is installed. Written under `state`.
    installed: AtomicU64,
}

impl CropCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog that is already `Ready` with `crops`.
    pub fn with_crops(crops: Vec<Crop>) -> Self {
        Self {
            state: RwLock::new(CatalogState::Ready(Arc::new(CatalogIndex::build(crops)))),
            ..Self::default()
        }
    }

    /// Fetches every crop document and replaces the catalog with the result.
    ///
    /// While a first load is pending lookups return `None`. A reload keeps
    /// serving the previous list until the new one is complete, and a failed
    /// reload leaves it in place.
    ///
    /// When loads overlap, the most recently started one wins: a slower,
    /// older fetch that finishes afterwards is discarded.
    pub async fn load<S>(&self, store: &S) -> Result<usize, StoreError>
    where
        S: DocumentStore + ?Sized,
    {
        let generation = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        self.begin_load();
        match store.fetch_collection(paths::CROPS).await {
            Ok(docs) => {
                let index = CatalogIndex::build(docs.iter().map(crop_from_document).collect());
                let count = index.len();
                let mut state = self.write();
                if generation < self.installed.load(Ordering::SeqCst) {
                    info!("Discarded crop catalog fetch superseded by a newer load");
                    return Ok(count);
                }
                self.installed.store(generation, Ordering::SeqCst);
                *state = CatalogState::Ready(Arc::new(index));
                info!("Crop catalog loaded with {count} crop(s)");
                Ok(count)
            }
            Err(err) => {
                self.abort_load();
                warn!("Crop catalog load failed: {err}");
                Err(err)
            }
        }
    }

    pub fn status(&self) -> CatalogStatus {
        match *self.read() {
            CatalogState::Absent => CatalogStatus::Absent,
            CatalogState::Loading => CatalogStatus::Loading,
            CatalogState::Ready(_) => CatalogStatus::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status() == CatalogStatus::Ready
    }

    /// The loaded index, if any.
    pub fn snapshot(&self) -> Option<Arc<CatalogIndex>> {
        match &*self.read() {
            CatalogState::Ready(index) => Some(Arc::clone(index)),
            _ => None,
        }
    }

    /// The loaded crop list, if any.
    pub fn crops(&self) -> Option<Vec<Crop>> {
        self.snapshot().map(|index| index.crops().to_vec())
    }

    fn begin_load(&self) {
        let mut state = self.write();
        if !matches!(*state, CatalogState::Ready(_)) {
            *state = CatalogState::Loading;
        }
    }

    fn abort_load(&self) {
        let mut state = self.write();
        if matches!(*state, CatalogState::Loading) {
            *state = CatalogState::Absent;
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CropLookup for CropCatalog {
    fn get_by_name(&self, name: &str) -> Option<Crop> {
        match &*self.read() {
            CatalogState::Ready(index) => index.get_by_name(name),
            _ => None,
        }
    }

    fn get_color(&self, name: &str) -> Option<String> {
        match &*self.read() {
            CatalogState::Ready(index) => index.get_color(name),
            _ => None,
        }
    }
}

fn crop_from_document(doc: &Document) -> Crop {
    Crop {
        id: doc.id.clone(),
        name: doc.str_field("name").unwrap_or_default().to_string(),
        density: doc.number_field("density").unwrap_or_default(),
        color: doc.str_field("color").unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::crops::default_store;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn crop(id: &str, name: &str, color: &str) -> Crop {
        Crop {
            id: id.into(),
            name: name.into(),
            density: 1.0,
            color: color.into(),
        }
    }

    /// Store whose crop fetch waits until `release` is notified.
    struct GatedStore {
        inner: MemoryStore,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl DocumentStore for GatedStore {
        async fn fetch_collection(&self, path: &str) -> Result<Vec<Document>, StoreError> {
            self.release.notified().await;
            self.inner.fetch_collection(path).await
        }

        async fn fetch_document(&self, path: &str) -> Result<Option<Document>, StoreError> {
            self.inner.fetch_document(path).await
        }

        async fn delete_document(&self, path: &str) -> Result<(), StoreError> {
            self.inner.delete_document(path).await
        }
    }

    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn fetch_collection(&self, _path: &str) -> Result<Vec<Document>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn fetch_document(&self, _path: &str) -> Result<Option<Document>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn delete_document(&self, _path: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn test_index_lookup_by_name_and_color() {
        let index = CatalogIndex::build(vec![
            crop("c1", "Carrot", "#ffae17"),
            crop("c2", "Potato", "#f2e355"),
        ]);
        assert_eq!(index.get_by_name("Carrot").map(|c| c.id), Some("c1".into()));
        assert_eq!(index.get_color("Potato").as_deref(), Some("#f2e355"));
        assert!(index.get_by_name("Turnip").is_none());
        assert!(index.get_color("Turnip").is_none());
    }

    #[test]
    fn test_index_duplicate_names_last_wins() {
        let index = CatalogIndex::build(vec![
            crop("c1", "Carrot", "#000000"),
            crop("c2", "Carrot", "#ffffff"),
        ]);
        assert_eq!(index.get_by_name("Carrot").map(|c| c.id), Some("c2".into()));
        assert_eq!(index.get_color("Carrot").as_deref(), Some("#ffffff"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_unloaded_catalog_returns_none() {
        let catalog = CropCatalog::new();
        assert_eq!(catalog.status(), CatalogStatus::Absent);
        assert!(catalog.get_by_name("Carrot").is_none());
        assert!(catalog.get_color("Carrot").is_none());
        assert!(catalog.crops().is_none());
    }

    #[test]
    fn test_loaded_but_empty_is_distinct_from_absent() {
        let catalog = CropCatalog::with_crops(vec![]);
        assert!(catalog.is_ready());
        assert_eq!(catalog.crops(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_load_populates_catalog() {
        let store = default_store().unwrap();
        let catalog = CropCatalog::new();
        let count = catalog.load(&store).await.unwrap();
        assert_eq!(count, 2);
        assert!(catalog.is_ready());
        let carrot = catalog.get_by_name("Carrot").unwrap();
        assert_eq!(carrot.id, "carrot");
        assert_eq!(catalog.get_color("Carrot"), Some(carrot.color));
    }

    #[tokio::test]
    async fn test_lookups_return_none_until_load_completes() {
        let release = Arc::new(Notify::new());
        let store = Arc::new(GatedStore {
            inner: default_store().unwrap(),
            release: Arc::clone(&release),
        });
        let catalog = Arc::new(CropCatalog::new());

        let loader = {
            let catalog = Arc::clone(&catalog);
            let store = Arc::clone(&store);
            tokio::spawn(async move { catalog.load(store.as_ref()).await })
        };

        while catalog.status() != CatalogStatus::Loading {
            tokio::task::yield_now().await;
        }
        assert!(catalog.get_by_name("Carrot").is_none());
        assert!(catalog.get_color("Carrot").is_none());

        release.notify_one();
        loader.await.unwrap().unwrap();
        assert!(catalog.get_by_name("Carrot").is_some());
        assert!(catalog.get_color("Carrot").is_some());
    }

    #[tokio::test]
    async fn test_failed_load_leaves_catalog_absent() {
        let catalog = CropCatalog::new();
        assert!(catalog.load(&FailingStore).await.is_err());
        assert_eq!(catalog.status(), CatalogStatus::Absent);
        assert!(catalog.get_by_name("Carrot").is_none());

        // An explicit retry against a healthy store succeeds.
        catalog.load(&default_store().unwrap()).await.unwrap();
        assert!(catalog.get_by_name("Carrot").is_some());
    }

    #[tokio::test]
    async fn test_abandoned_load_reads_as_not_loaded_and_next_load_succeeds() {
        let store = Arc::new(GatedStore {
            inner: default_store().unwrap(),
            release: Arc::new(Notify::new()),
        });
        let catalog = Arc::new(CropCatalog::new());

        let loader = {
            let catalog = Arc::clone(&catalog);
            let store = Arc::clone(&store);
            tokio::spawn(async move { catalog.load(store.as_ref()).await })
        };
        while catalog.status() != CatalogStatus::Loading {
            tokio::task::yield_now().await;
        }
        loader.abort();
        assert!(loader.await.unwrap_err().is_cancelled());

        assert!(catalog.get_by_name("Carrot").is_none());
        assert!(catalog.get_color("Carrot").is_none());
        assert!(catalog.crops().is_none());

        catalog.load(&default_store().unwrap()).await.unwrap();
        assert_eq!(catalog.status(), CatalogStatus::Ready);
        assert!(catalog.get_by_name("Carrot").is_some());
    }

    #[tokio::test]
    async fn test_older_load_finishing_last_does_not_overwrite_newer() {
        let older = Arc::new(GatedStore {
            inner: default_store().unwrap(),
            release: Arc::new(Notify::new()),
        });
        let newer_store = default_store().unwrap();
        newer_store
            .put_json("crops/leek", serde_json::json!({ "name": "Leek", "color": "#3b7a2a" }))
            .await
            .unwrap();
        let catalog = Arc::new(CropCatalog::new());

        let slow = {
            let catalog = Arc::clone(&catalog);
            let older = Arc::clone(&older);
            tokio::spawn(async move { catalog.load(older.as_ref()).await })
        };
        while catalog.status() != CatalogStatus::Loading {
            tokio::task::yield_now().await;
        }

        assert_eq!(catalog.load(&newer_store).await.unwrap(), 3);
        older.release.notify_one();
        slow.await.unwrap().unwrap();

        assert!(catalog.get_by_name("Leek").is_some());
        assert_eq!(catalog.crops().map(|c| c.len()), Some(3));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_catalog() {
        let catalog = CropCatalog::with_crops(vec![crop("c1", "Carrot", "#ffae17")]);
        assert!(catalog.load(&FailingStore).await.is_err());
        assert!(catalog.is_ready());
        assert!(catalog.get_by_name("Carrot").is_some());
    }

    #[tokio::test]
    async fn test_reload_replaces_indices() {
        let store = default_store().unwrap();
        let catalog = CropCatalog::new();
        catalog.load(&store).await.unwrap();

        store.delete_document("crops/potato").await.unwrap();
        catalog.load(&store).await.unwrap();

        assert!(catalog.get_by_name("Potato").is_none());
        assert!(catalog.get_color("Potato").is_none());
        assert!(catalog.get_by_name("Carrot").is_some());
    }

    #[tokio::test]
    async fn test_missing_fields_are_coerced() {
        let store = MemoryStore::new();
        store
            .put_json("crops/mystery", serde_json::json!({ "name": "Mystery" }))
            .await
            .unwrap();
        let catalog = CropCatalog::new();
        catalog.load(&store).await.unwrap();
        let mystery = catalog.get_by_name("Mystery").unwrap();
        assert_eq!(mystery.density, 0.0);
        assert_eq!(mystery.color, "");
    }
}
