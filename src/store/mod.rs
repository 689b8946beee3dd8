//! Record stores - Document persistence keyed by store-assigned identifiers.
//!
//! A `RecordStore` persists `Document`s grouped into collections. The store is
//! the only authority for identifiers: saving a document without an id assigns
//! a fresh UUID, saving one with an id replaces the stored copy.
//!
//! ## Example
//!
//! ```ignore
//! use movies_info_service::store::{InMemoryStore, RecordStore};
//!
//! let store = InMemoryStore::new();
//! let saved = store.save(movie).await?;
//! let loaded = store.find_by_id::<MovieInfo>(saved.id().unwrap()).await?;
//! ```

mod file;
mod in_memory;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub use file::FileStore;
pub use in_memory::InMemoryStore;

/// Trait for types that can be stored as documents.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection name for this document type (e.g., "movie_infos").
    const COLLECTION: &'static str;

    /// Returns the identifier, if one has been assigned.
    fn id(&self) -> Option<&str>;

    /// Returns a copy of this document carrying the given identifier.
    fn with_id(self, id: String) -> Self;
}

/// A lazy, finite stream of documents. Not restartable once consumed.
pub type DocumentStream<D> = BoxStream<'static, Result<D, StoreError>>;

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A lock guarding store state was poisoned by a panicking writer.
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// Document encode/decode failed.
    #[error("document serialization error: {0}")]
    Serde(String),
    /// Reading or writing the backing file failed.
    #[error("store I/O error: {0}")]
    Io(String),
    /// The backing file exists but could not be decoded.
    #[error("store snapshot is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

/// Async CRUD storage for documents.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Persist a document, assigning an id when it has none.
    async fn save<D: Document>(&self, doc: D) -> Result<D, StoreError>;

    /// Persist each document in order. Not atomic: a failure part-way leaves
    /// earlier documents saved.
    async fn save_all<D: Document>(&self, docs: Vec<D>) -> Result<Vec<D>, StoreError> {
        let mut saved = Vec::with_capacity(docs.len());
        for doc in docs {
            saved.push(self.save(doc).await?);
        }
        Ok(saved)
    }

    /// Stream every document in the collection, in insertion order.
    async fn find_all<D: Document>(&self) -> Result<DocumentStream<D>, StoreError>;

    /// Get a document by id. Returns None if not found.
    async fn find_by_id<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError>;

    /// Delete a document by id. Deleting a missing id is not an error.
    async fn delete_by_id<D: Document>(&self, id: &str) -> Result<(), StoreError>;

    /// Remove every document in the collection.
    async fn delete_all<D: Document>(&self) -> Result<(), StoreError>;

    /// Number of documents in the collection.
    async fn count<D: Document>(&self) -> Result<usize, StoreError>;
}

/// Generate a fresh document identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
