use std::sync::Arc;

use service::auth::repository::AuthRepository;
use service::auth::{AuthConfig, AuthService};
use service::place::repository::PlaceRepository;
use service::place::PlaceService;
use service::storage::BlobStore;
use service::user_service::UserService;

use crate::views::Views;

/// Extra room on top of the photo limit for the other multipart fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct ServerState {
    pub places: PlaceService,
    pub users: UserService,
    pub auth: Arc<AuthService<dyn AuthRepository>>,
    pub views: Arc<Views>,
    pub body_limit: usize,
}

impl ServerState {
    pub fn new(
        place_repo: Arc<dyn PlaceRepository>,
        blobs: Arc<dyn BlobStore>,
        user_repo: Arc<dyn AuthRepository>,
        auth: AuthConfig,
        max_photo_bytes: usize,
    ) -> Result<Self, tera::Error> {
        let places = PlaceService::new(place_repo, blobs, max_photo_bytes);
        let users = UserService::new(places.clone(), Arc::clone(&user_repo));
        Ok(Self {
            places,
            users,
            auth: Arc::new(AuthService::new(user_repo, auth)),
            views: Arc::new(Views::new()?),
            body_limit: max_photo_bytes + FORM_OVERHEAD_BYTES,
        })
    }
}
