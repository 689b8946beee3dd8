//! InMemoryStore - HashMap-backed record store for tests and single-node use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{new_id, Document, DocumentStream, RecordStore, StoreError};

/// Internal stored representation of a document.
struct StoredDocument {
    bytes: Vec<u8>,
    seq: u64,
}

#[derive(Default)]
struct Collections {
    documents: HashMap<String, StoredDocument>,
    next_seq: u64,
}

impl Collections {
    /// Insert or replace; a replaced document keeps its position.
    fn put(&mut self, key: String, bytes: Vec<u8>) {
        let seq = match self.documents.get(&key) {
            Some(stored) => stored.seq,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };
        self.documents.insert(key, StoredDocument { bytes, seq });
    }
}

/// One stored document in exported form, keyed by `"collection:id"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SnapshotEntry {
    pub key: String,
    pub bytes: Vec<u8>,
}

/// In-memory record store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`; documents are kept JSON-encoded so every
/// read hands out a fresh copy. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn prefix(collection: &str) -> String {
        format!("{}:", collection)
    }

    fn put_raw(&self, key: String, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        storage.put(key, bytes);
        Ok(())
    }

    /// Export every stored document across all collections, in insertion order.
    pub(crate) fn export(&self) -> Result<Vec<SnapshotEntry>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        let mut entries: Vec<(u64, SnapshotEntry)> = storage
            .documents
            .iter()
            .map(|(key, stored)| {
                (
                    stored.seq,
                    SnapshotEntry {
                        key: key.clone(),
                        bytes: stored.bytes.clone(),
                    },
                )
            })
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        Ok(entries.into_iter().map(|(_, entry)| entry).collect())
    }

    /// Load exported entries, appending them in the order given.
    pub(crate) fn import(&self, entries: Vec<SnapshotEntry>) -> Result<(), StoreError> {
        for entry in entries {
            self.put_raw(entry.key, entry.bytes)?;
        }
        Ok(())
    }

    /// Replace the whole contents with exported entries, under one write lock.
    pub(crate) fn restore(&self, entries: Vec<SnapshotEntry>) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        *storage = Collections::default();
        for entry in entries {
            storage.put(entry.key, entry.bytes);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn save<D: Document>(&self, doc: D) -> Result<D, StoreError> {
        let doc = match doc.id() {
            Some(_) => doc,
            None => doc.with_id(new_id()),
        };
        let id = doc.id().unwrap_or_default().to_string();
        let bytes = serde_json::to_vec(&doc)?;

        self.put_raw(Self::make_key(D::COLLECTION, &id), bytes)?;
        debug!(collection = D::COLLECTION, %id, "saved document");
        Ok(doc)
    }

    async fn find_all<D: Document>(&self) -> Result<DocumentStream<D>, StoreError> {
        let prefix = Self::prefix(D::COLLECTION);
        let mut matching: Vec<(u64, Vec<u8>)> = {
            let storage = self
                .storage
                .read()
                .map_err(|_| StoreError::LockPoisoned("read"))?;
            storage
                .documents
                .iter()
                .filter(|(key, _)| key.starts_with(&prefix))
                .map(|(_, stored)| (stored.seq, stored.bytes.clone()))
                .collect()
        };
        matching.sort_by_key(|(seq, _)| *seq);
        debug!(collection = D::COLLECTION, count = matching.len(), "streaming documents");

        let stream = futures::stream::iter(matching)
            .map(|(_, bytes)| serde_json::from_slice::<D>(&bytes).map_err(StoreError::from));
        Ok(stream.boxed())
    }

    async fn find_by_id<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError> {
        let key = Self::make_key(D::COLLECTION, id);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        match storage.documents.get(&key) {
            Some(stored) => Ok(Some(serde_json::from_slice(&stored.bytes)?)),
            None => Ok(None),
        }
    }

    async fn delete_by_id<D: Document>(&self, id: &str) -> Result<(), StoreError> {
        let key = Self::make_key(D::COLLECTION, id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let existed = storage.documents.remove(&key).is_some();
        debug!(collection = D::COLLECTION, %id, existed, "deleted document");
        Ok(())
    }

    async fn delete_all<D: Document>(&self) -> Result<(), StoreError> {
        let prefix = Self::prefix(D::COLLECTION);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        storage.documents.retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }

    async fn count<D: Document>(&self) -> Result<usize, StoreError> {
        let prefix = Self::prefix(D::COLLECTION);
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;

        Ok(storage
            .documents
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .count())
    }
}
