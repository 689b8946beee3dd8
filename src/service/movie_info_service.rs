//! CRUD service for movie info records.
//!
//! A `MovieInfoService<S>` owns a record store and enforces the create-path
//! validation rules before anything reaches it. Every operation is one store
//! call, except update which fetches and then saves.
//!
//! ## Example
//!
//! ```ignore
//! use movies_info_service::{InMemoryStore, MovieInfoService};
//!
//! let service = MovieInfoService::new(InMemoryStore::new());
//! let created = service.add_movie_info(movie).await?;
//! let loaded = service.get_movie_info_by_id(created.id.as_deref().unwrap()).await?;
//! ```

use tracing::{debug, info};

use super::error::ServiceError;
use crate::movie_info::MovieInfo;
use crate::store::{DocumentStream, RecordStore};
use crate::validation::validate;

/// Orchestrates validation and store calls for movie info records.
///
/// The type parameter `S` is the record store. The service holds no state
/// of its own beyond the store.
pub struct MovieInfoService<S> {
    store: S,
}

impl<S: RecordStore> MovieInfoService<S> {
    /// Create a new service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new record. Any client-supplied id is dropped.
    pub async fn add_movie_info(&self, movie: MovieInfo) -> Result<MovieInfo, ServiceError> {
        let errors = validate(&movie);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let saved = self.store.save(movie.without_id()).await?;
        info!(id = ?saved.id, name = %saved.name, "added movie info");
        Ok(saved)
    }

    /// Stream every stored record.
    pub async fn get_all(&self) -> Result<DocumentStream<MovieInfo>, ServiceError> {
        Ok(self.store.find_all::<MovieInfo>().await?)
    }

    /// Look up a record by id. A missing record is `Ok(None)`.
    pub async fn get_movie_info_by_id(&self, id: &str) -> Result<Option<MovieInfo>, ServiceError> {
        let found = self.store.find_by_id::<MovieInfo>(id).await?;
        debug!(%id, found = found.is_some(), "looked up movie info");
        Ok(found)
    }

    /// Replace every field of an existing record except its id.
    ///
    /// The patch is not validated. Fails with `NotFound` when no record has
    /// this id.
    pub async fn update_movie_info(
        &self,
        id: &str,
        patch: MovieInfo,
    ) -> Result<MovieInfo, ServiceError> {
        let existing: MovieInfo = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

        let saved = self.store.save(existing.replaced_by(patch)).await?;
        info!(%id, "updated movie info");
        Ok(saved)
    }

    /// Delete a record. Succeeds whether or not the id existed.
    pub async fn delete_movie_info(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete_by_id::<MovieInfo>(id).await?;
        info!(%id, "deleted movie info");
        Ok(())
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.count::<MovieInfo>().await?)
    }
}
