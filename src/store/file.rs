//! FileStore - InMemoryStore persisted to a bitcode snapshot file.
//!
//! Every mutation rewrites the whole snapshot: the entries are encoded to a
//! sibling temp file which is then renamed over the target. Writers queue on
//! an async mutex so snapshots land on disk in mutation order. A mutation
//! whose snapshot cannot be written is rolled back in memory too.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::in_memory::SnapshotEntry;
use super::{Document, DocumentStream, InMemoryStore, RecordStore, StoreError};

/// Record store that keeps documents in memory and mirrors them to disk.
#[derive(Clone)]
pub struct FileStore {
    inner: InMemoryStore,
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Open the store at `path`, loading an existing snapshot if present.
    ///
    /// A missing file yields an empty store. A file that cannot be decoded
    /// fails with `StoreError::Corrupt`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let inner = InMemoryStore::new();

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let entries: Vec<SnapshotEntry> = bitcode::deserialize(&bytes)
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?;
                info!(path = %path.display(), documents = entries.len(), "loaded store snapshot");
                inner.import(entries)?;
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no store snapshot, starting empty");
            }
            Err(err) => return Err(err.into()),
        }

        Ok(Self {
            inner,
            path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self) -> Result<(), StoreError> {
        let entries = self.inner.export()?;
        let bytes = bitcode::serialize(&entries).map_err(|e| StoreError::Serde(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "flushed store snapshot");
        Ok(())
    }

    /// Flush after a mutation; on failure put `before` back and return the error.
    async fn commit<T>(&self, before: Vec<SnapshotEntry>, value: T) -> Result<T, StoreError> {
        match self.flush().await {
            Ok(()) => Ok(value),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "snapshot write failed, rolling back"
                );
                self.inner.restore(before)?;
                Err(err)
            }
        }
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn save<D: Document>(&self, doc: D) -> Result<D, StoreError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.export()?;
        let saved = self.inner.save(doc).await?;
        self.commit(before, saved).await
    }

    async fn find_all<D: Document>(&self) -> Result<DocumentStream<D>, StoreError> {
        self.inner.find_all().await
    }

    async fn find_by_id<D: Document>(&self, id: &str) -> Result<Option<D>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn delete_by_id<D: Document>(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.export()?;
        self.inner.delete_by_id::<D>(id).await?;
        self.commit(before, ()).await
    }

    async fn delete_all<D: Document>(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let before = self.inner.export()?;
        self.inner.delete_all::<D>().await?;
        self.commit(before, ()).await
    }

    async fn count<D: Document>(&self) -> Result<usize, StoreError> {
        self.inner.count::<D>().await
    }
}
