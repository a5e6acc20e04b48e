use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::store::{
    validate_collection_path, validate_document_path, Document, DocumentStore, Fields, StoreError,
};

/// Process-local document store keyed by full document path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Fields>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<I, P>(documents: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (P, Fields)>,
        P: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (path, fields) in documents {
            let path = path.into();
            validate_document_path(&path)?;
            map.insert(path, fields);
        }
        Ok(Self {
            documents: RwLock::new(map),
        })
    }

    /// Builds a store from a JSON object mapping document paths to field objects:
    /// `{ "crops/c1": { "name": "Carrot", ... }, ... }`.
    pub fn from_seed_json(json: &str) -> Result<Self, StoreError> {
        let seed: BTreeMap<String, Fields> = serde_json::from_str(json)?;
        Self::from_documents(seed)
    }

    pub fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_seed_json(&json)
    }

    /// Creates or replaces the document at `path`.
    pub async fn put(&self, path: impl Into<String>, fields: Fields) -> Result<(), StoreError> {
        let path = path.into();
        validate_document_path(&path)?;
        self.documents.write().await.insert(path, fields);
        Ok(())
    }

    /// Convenience for tests and seeding: `value` must be a JSON object.
    pub async fn put_json(&self, path: impl Into<String>, value: Value) -> Result<(), StoreError> {
        let fields = match value {
            Value::Object(map) => map,
            other => {
                return Err(StoreError::SeedFormat(serde::de::Error::custom(format!(
                    "expected an object, got {other}"
                ))))
            }
        };
        self.put(path, fields).await
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.documents.read().await.contains_key(path)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_collection(&self, path: &str) -> Result<Vec<Document>, StoreError> {
        validate_collection_path(path)?;
        let prefix = format!("{path}/");
        let documents = self.documents.read().await;
        Ok(documents
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter(|(key, _)| !key[prefix.len()..].contains('/'))
            .map(|(key, fields)| Document::new(key.clone(), fields.clone()))
            .collect())
    }

    async fn fetch_document(&self, path: &str) -> Result<Option<Document>, StoreError> {
        validate_document_path(path)?;
        Ok(self
            .documents
            .read()
            .await
            .get(path)
            .map(|fields| Document::new(path, fields.clone())))
    }

    async fn delete_document(&self, path: &str) -> Result<(), StoreError> {
        validate_document_path(path)?;
        self.documents.write().await.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .put_json("gardens/u1/gardens/g1", json!({ "name": "Back yard" }))
            .await
            .unwrap();
        store
            .put_json("gardens/u1/gardens/g1/tiles/0,0", json!({ "name": "Carrot" }))
            .await
            .unwrap();
        store
            .put_json("gardens/u1/gardens/g2", json!({ "name": "Balcony" }))
            .await
            .unwrap();
        store
            .put_json("gardens/u2/gardens/g3", json!({ "name": "Allotment" }))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_fetch_collection_returns_direct_children_only() {
        let store = seeded().await;
        let docs = store.fetch_collection("gardens/u1/gardens").await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["g1", "g2"]);
    }

    #[tokio::test]
    async fn test_fetch_collection_empty_when_unknown() {
        let store = seeded().await;
        let docs = store.fetch_collection("gardens/nobody/gardens").await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_document_present_and_missing() {
        let store = seeded().await;
        let doc = store.fetch_document("gardens/u1/gardens/g1").await.unwrap();
        assert_eq!(doc.unwrap().str_field("name"), Some("Back yard"));
        let missing = store.fetch_document("gardens/u1/gardens/zzz").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_document_is_idempotent() {
        let store = seeded().await;
        let path = "gardens/u1/gardens/g1/tiles/0,0";
        store.delete_document(path).await.unwrap();
        assert!(!store.contains(path).await);
        store.delete_document(path).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_paths_are_rejected() {
        let store = seeded().await;
        assert!(matches!(
            store.fetch_collection("gardens/u1").await,
            Err(StoreError::InvalidPath { .. })
        ));
        assert!(matches!(
            store.fetch_document("gardens").await,
            Err(StoreError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_from_seed_json() {
        let store = MemoryStore::from_seed_json(
            r#"{ "crops/c1": { "name": "Carrot" }, "crops/c2": { "name": "Potato" } }"#,
        )
        .unwrap();
        assert_eq!(store.documents.blocking_read().len(), 2);
    }

    #[test]
    fn test_from_seed_json_rejects_collection_paths() {
        let result = MemoryStore::from_seed_json(r#"{ "crops": { "name": "Carrot" } }"#);
        assert!(matches!(result, Err(StoreError::InvalidPath { .. })));
    }
}
