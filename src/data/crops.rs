use serde_json::json;

use crate::store::{paths, Fields, MemoryStore, StoreError};

/// Crops every fresh store starts with: `(id, name, density per m², colour)`.
pub const DEFAULT_CROPS: [(&str, &str, f64, &str); 2] = [
    ("carrot", "Carrot", 80.0, "#ffae17"),
    ("potato", "Potato", 4.0, "#f2e355"),
];

/// Catalog documents as `(path, fields)` pairs.
pub fn default_crop_documents() -> Vec<(String, Fields)> {
    DEFAULT_CROPS
        .iter()
        .map(|(id, name, density, color)| {
            let fields = match json!({ "name": name, "density": density, "color": color }) {
                serde_json::Value::Object(map) => map,
                _ => Fields::new(),
            };
            (format!("{}/{id}", paths::CROPS), fields)
        })
        .collect()
}

/// An in-memory store holding only the default crop catalog.
pub fn default_store() -> Result<MemoryStore, StoreError> {
    MemoryStore::from_documents(default_crop_documents())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentStore;

    #[tokio::test]
    async fn test_default_store_holds_catalog() {
        let store = default_store().unwrap();
        let crops = store.fetch_collection(paths::CROPS).await.unwrap();
        assert_eq!(crops.len(), DEFAULT_CROPS.len());
        let carrot = crops.iter().find(|d| d.id == "carrot").unwrap();
        assert_eq!(carrot.str_field("color"), Some("#ffae17"));
    }
}
