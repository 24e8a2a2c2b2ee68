//! Document store adapters
//!
//! The collection is read in full and written in full on every call. There is
//! no locking and no atomic replace: a crash in the middle of [`JsonFileStore::save`]
//! can leave a truncated file behind, and two processes saving concurrently
//! overwrite each other (last writer wins). Callers that need more must
//! serialize access themselves or swap in another [`DocumentStore`].

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use shared_types::DocumentCollection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store not found: {0}")]
    NotFound(String),

    #[error("Failed to read document store: {0}")]
    Read(String),

    #[error("Failed to write document store: {0}")]
    Write(String),
}

/// Whole-collection load/save
pub trait DocumentStore: Send + Sync {
    fn load(&self) -> Result<DocumentCollection, StoreError>;

    fn save(&self, collection: &DocumentCollection) -> Result<(), StoreError>;
}

/// A single pretty-printed JSON file mapping doc_id to document
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<DocumentCollection, StoreError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(self.path.display().to_string()),
            _ => StoreError::Read(format!("{}: {}", self.path.display(), e)),
        })?;
        let collection: DocumentCollection = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Read(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(
            path = %self.path.display(),
            documents = collection.len(),
            "Loaded document store"
        );
        Ok(collection)
    }

    fn save(&self, collection: &DocumentCollection) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(collection)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| StoreError::Write(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(
            path = %self.path.display(),
            documents = collection.len(),
            "Saved document store"
        );
        Ok(())
    }
}

/// In-process store; an unseeded store behaves like a missing file
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: Mutex<Option<DocumentCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(collection: DocumentCollection) -> Self {
        Self {
            collection: Mutex::new(Some(collection)),
        }
    }

    /// Current contents without going through `load`
    pub fn snapshot(&self) -> Option<DocumentCollection> {
        self.collection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<DocumentCollection, StoreError> {
        self.snapshot()
            .ok_or_else(|| StoreError::NotFound("in-memory store is empty".to_string()))
    }

    fn save(&self, collection: &DocumentCollection) -> Result<(), StoreError> {
        *self
            .collection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(collection.clone());
        Ok(())
    }
}
