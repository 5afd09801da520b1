use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{NewPlaceInput, Place, PlaceDetailsUpdate, ValidatedPhoto};
use super::lifecycle::PlaceLifecycle;
use super::photo::PHOTO_PREFIX;
use super::repository::PlaceRepository;
use crate::errors::ServiceError;
use crate::storage::BlobStore;

/// Ownership-checked place operations. Every call names the acting user.
#[derive(Clone)]
pub struct PlaceService {
    lifecycle: PlaceLifecycle,
    max_photo_bytes: usize,
}

impl PlaceService {
    pub fn new(repo: Arc<dyn PlaceRepository>, blobs: Arc<dyn BlobStore>, max_photo_bytes: usize) -> Self {
        Self { lifecycle: PlaceLifecycle::new(repo, blobs), max_photo_bytes }
    }

    pub fn lifecycle(&self) -> &PlaceLifecycle { &self.lifecycle }

    pub fn max_photo_bytes(&self) -> usize { self.max_photo_bytes }

    /// Places `user` still wants to visit, by name.
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn list_wishlist(&self, user: Uuid) -> Result<Vec<Place>, ServiceError> {
        self.lifecycle.repo().list_for_owner(user, Some(false)).await
    }

    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn list_visited(&self, user: Uuid) -> Result<Vec<Place>, ServiceError> {
        self.lifecycle.repo().list_for_owner(user, Some(true)).await
    }

    #[instrument(skip(self, input), fields(user_id = %user))]
    pub async fn create(&self, user: Uuid, input: NewPlaceInput) -> Result<Place, ServiceError> {
        let place = self.lifecycle.create(user, &input.name, input.visited).await?;
        info!(event = "place_created", place_id = place.id, name = %place.name);
        Ok(place)
    }

    /// One-way transition to visited. Calling it again is a no-op.
    #[instrument(skip(self), fields(user_id = %user, place_id = id))]
    pub async fn mark_visited(&self, user: Uuid, id: i32) -> Result<Place, ServiceError> {
        let place = self.owned(user, id).await?;
        if place.visited {
            return Ok(place);
        }
        let next = Place { visited: true, ..place.clone() };
        let saved = self.lifecycle.save(&next, Some(&place)).await?;
        info!(event = "place_visited", place_id = id);
        Ok(saved)
    }

    #[instrument(skip(self), fields(user_id = %user, place_id = id))]
    pub async fn delete(&self, user: Uuid, id: i32) -> Result<(), ServiceError> {
        let place = self.owned(user, id).await?;
        self.lifecycle.delete(&place).await?;
        info!(event = "place_deleted", place_id = id);
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user, place_id = id))]
    pub async fn get_details(&self, user: Uuid, id: i32) -> Result<Place, ServiceError> {
        self.owned(user, id).await
    }

    /// Apply a partial update of notes, visit date and photo.
    ///
    /// Input is fully validated before anything is written. A replacement
    /// photo is stored first and removed again if the record save fails;
    /// the photo it replaces is removed after the save.
    #[instrument(skip(self, update), fields(user_id = %user, place_id = id))]
    pub async fn update_details(&self, user: Uuid, id: i32, update: PlaceDetailsUpdate) -> Result<Place, ServiceError> {
        let current = self.owned(user, id).await?;
        let details = update.validate(self.max_photo_bytes)?;

        let mut next = current.clone();
        if let Some(notes) = details.notes {
            next.notes = notes;
        }
        if let Some(date) = details.date_visited {
            next.date_visited = date;
        }

        let mut written = None;
        match details.photo {
            ValidatedPhoto::Keep => {}
            ValidatedPhoto::Clear => next.photo = None,
            ValidatedPhoto::Replace(photo) => {
                let name = photo.blob_name();
                self.lifecycle.blobs().put(&name, &photo.bytes).await?;
                next.photo = Some(name.clone());
                written = Some(name);
            }
        }

        match self.lifecycle.save(&next, Some(&current)).await {
            Ok(saved) => {
                info!(event = "place_details_updated", place_id = id, photo = ?saved.photo);
                Ok(saved)
            }
            Err(e) => {
                if let Some(name) = written {
                    self.lifecycle.delete_photo(&name).await;
                }
                Err(e)
            }
        }
    }

    /// Delete every place owned by `user` through the lifecycle, blobs included.
    #[instrument(skip(self), fields(user_id = %user))]
    pub async fn delete_all_for_owner(&self, user: Uuid) -> Result<usize, ServiceError> {
        let places = self.lifecycle.repo().list_for_owner(user, None).await?;
        let mut removed = 0;
        for place in &places {
            if self.lifecycle.delete(place).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Photo bytes for a blob referenced by one of `user`'s places.
    pub async fn photo(&self, user: Uuid, name: &str) -> Result<Vec<u8>, ServiceError> {
        if !name.starts_with(PHOTO_PREFIX) {
            return Err(ServiceError::not_found("photo"));
        }
        let places = self.lifecycle.repo().list_for_owner(user, None).await?;
        if !places.iter().any(|p| p.photo.as_deref() == Some(name)) {
            return Err(ServiceError::not_found("photo"));
        }
        self.lifecycle.blobs().get(name).await?.ok_or_else(|| ServiceError::not_found("photo"))
    }

    async fn owned(&self, user: Uuid, id: i32) -> Result<Place, ServiceError> {
        let place = self.lifecycle.repo().get(id).await?.ok_or_else(|| ServiceError::not_found("place"))?;
        if !place.is_owned_by(user) {
            warn!(event = "place_access_denied", place_id = id, user_id = %user);
            return Err(ServiceError::Forbidden);
        }
        Ok(place)
    }
}
