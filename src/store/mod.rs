//! Document-store contract.
//!
//! Paths follow the usual document-database layout: a collection path has an
//! odd number of `/`-separated segments (`crops`, `gardens/u1/gardens`) and a
//! document path an even number (`crops/c1`).

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Field map of a stored document.
pub type Fields = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid {kind} path '{path}'")]
    InvalidPath { kind: &'static str, path: String },

    #[error("invalid document id '{0}'")]
    InvalidId(String),

    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read seed data: {0}")]
    SeedIo(#[from] std::io::Error),

    #[error("malformed seed data: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

/// A document read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Last path segment.
    pub id: String,
    /// Full document path.
    pub path: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(path: impl Into<String>, fields: Fields) -> Self {
        let path = path.into();
        let id = path.rsplit('/').next().unwrap_or_default().to_string();
        Self { id, path, fields }
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn number_field(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(Value::as_f64)
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(Value::as_bool)
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Returns every document directly inside the collection at `path`.
    async fn fetch_collection(&self, path: &str) -> Result<Vec<Document>, StoreError>;

    /// Returns the document at `path`, or `None` if it does not exist.
    async fn fetch_document(&self, path: &str) -> Result<Option<Document>, StoreError>;

    /// Deletes the document at `path`. Deleting a missing document is not an error.
    async fn delete_document(&self, path: &str) -> Result<(), StoreError>;
}

fn segment_count(path: &str) -> Option<usize> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments.len())
}

pub fn validate_collection_path(path: &str) -> Result<(), StoreError> {
    match segment_count(path) {
        Some(n) if n % 2 == 1 => Ok(()),
        _ => Err(StoreError::InvalidPath {
            kind: "collection",
            path: path.to_string(),
        }),
    }
}

pub fn validate_document_path(path: &str) -> Result<(), StoreError> {
    match segment_count(path) {
        Some(n) if n % 2 == 0 => Ok(()),
        _ => Err(StoreError::InvalidPath {
            kind: "document",
            path: path.to_string(),
        }),
    }
}

/// Checks that `id` can stand as a single path segment.
pub fn validate_id(id: &str) -> Result<&str, StoreError> {
    if id.is_empty() || id.contains('/') {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(id)
}

impl StoreError {
    /// True when the request itself was malformed rather than the store failing.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, StoreError::InvalidPath { .. } | StoreError::InvalidId(_))
    }
}

/// Locations of the application's collections and documents.
pub mod paths {
    pub const CROPS: &str = "crops";

    pub fn user_gardens(uid: &str) -> String {
        format!("gardens/{uid}/gardens")
    }

    pub fn garden(uid: &str, garden_id: &str) -> String {
        format!("gardens/{uid}/gardens/{garden_id}")
    }

    pub fn garden_tiles(uid: &str, garden_id: &str) -> String {
        format!("{}/tiles", garden(uid, garden_id))
    }

    pub fn user(uid: &str) -> String {
        format!("users/{uid}")
    }
}
