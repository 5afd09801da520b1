use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use super::domain::Place;
use super::repository::PlaceRepository;
use crate::errors::ServiceError;
use crate::storage::BlobStore;

/// Keeps place records and their photo blobs in step: whenever a record
/// stops referencing a blob, the blob is removed.
#[derive(Clone)]
pub struct PlaceLifecycle {
    repo: Arc<dyn PlaceRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl PlaceLifecycle {
    pub fn new(repo: Arc<dyn PlaceRepository>, blobs: Arc<dyn BlobStore>) -> Self { Self { repo, blobs } }

    pub fn repo(&self) -> &Arc<dyn PlaceRepository> { &self.repo }
    pub fn blobs(&self) -> &Arc<dyn BlobStore> { &self.blobs }

    /// Insert a new record. A new record has no previous photo to clean up.
    pub async fn create(&self, owner: Uuid, name: &str, visited: bool) -> Result<Place, ServiceError> {
        self.repo.create(owner, name, visited).await
    }

    /// Persist `place`. When `previous` carried a photo that the saved
    /// state no longer references, that blob is deleted after the write.
    pub async fn save(&self, place: &Place, previous: Option<&Place>) -> Result<Place, ServiceError> {
        let saved = self.repo.save(place).await?;
        if let Some(old) = previous.and_then(|p| p.photo.as_deref()) {
            if saved.photo.as_deref() != Some(old) {
                self.delete_photo(old).await;
            }
        }
        Ok(saved)
    }

    /// Remove the record, then its photo blob if it had one.
    pub async fn delete(&self, place: &Place) -> Result<bool, ServiceError> {
        let removed = self.repo.delete(place.id).await?;
        if let Some(photo) = place.photo.as_deref() {
            self.delete_photo(photo).await;
        }
        Ok(removed)
    }

    /// Best-effort blob removal; a missing blob is fine, failures are logged.
    pub async fn delete_photo(&self, name: &str) {
        match self.blobs.delete(name).await {
            Ok(true) => debug!(event = "photo_deleted", blob = %name),
            Ok(false) => debug!(event = "photo_already_gone", blob = %name),
            Err(e) => warn!(event = "photo_delete_failed", blob = %name, error = %e),
        }
    }
}
