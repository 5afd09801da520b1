use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;
use crate::place::PlaceService;

/// Account-level operations spanning places and users.
#[derive(Clone)]
pub struct UserService {
    places: PlaceService,
    users: Arc<dyn AuthRepository>,
}

impl UserService {
    pub fn new(places: PlaceService, users: Arc<dyn AuthRepository>) -> Self { Self { places, users } }

    /// Delete a user and everything it owns. Places go through the
    /// lifecycle first so their photo blobs are removed too.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), ServiceError> {
        let places = self.places.delete_all_for_owner(user_id).await?;
        let removed = self.users.delete_user(user_id).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        if !removed {
            return Err(ServiceError::not_found("user"));
        }
        info!(event = "user_deleted", places_removed = places);
        Ok(())
    }
}
