use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Place;
use crate::errors::ServiceError;

/// Record storage for places.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn get(&self, id: i32) -> Result<Option<Place>, ServiceError>;
    /// Places of `owner`, optionally filtered by `visited`, ordered by name then id.
    async fn list_for_owner(&self, owner: Uuid, visited: Option<bool>) -> Result<Vec<Place>, ServiceError>;
    async fn create(&self, owner: Uuid, name: &str, visited: bool) -> Result<Place, ServiceError>;
    async fn save(&self, place: &Place) -> Result<Place, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;

    use chrono::Utc;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockPlaceRepository {
        rows: RwLock<BTreeMap<i32, Place>>, // key: place id
    }

    impl MockPlaceRepository {
        pub fn new() -> Self { Self::default() }

        /// Insert a fully-formed record, keeping its id (fixture loading).
        pub async fn seed(&self, place: Place) {
            self.rows.write().await.insert(place.id, place);
        }

        pub async fn len(&self) -> usize { self.rows.read().await.len() }
    }

    #[async_trait]
    impl PlaceRepository for MockPlaceRepository {
        async fn get(&self, id: i32) -> Result<Option<Place>, ServiceError> {
            Ok(self.rows.read().await.get(&id).cloned())
        }

        async fn list_for_owner(&self, owner: Uuid, visited: Option<bool>) -> Result<Vec<Place>, ServiceError> {
            let rows = self.rows.read().await;
            let mut out: Vec<Place> = rows
                .values()
                .filter(|p| p.user_id == owner && visited.map_or(true, |v| p.visited == v))
                .cloned()
                .collect();
            // BTreeMap iteration is already id-ordered, so a stable sort keeps ties by id
            out.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(out)
        }

        async fn create(&self, owner: Uuid, name: &str, visited: bool) -> Result<Place, ServiceError> {
            let name = models::place::validate_name(name)?;
            let mut rows = self.rows.write().await;
            let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
            let now = Utc::now().into();
            let place = Place {
                id,
                user_id: owner,
                name,
                visited,
                notes: None,
                date_visited: None,
                photo: None,
                created_at: now,
                updated_at: now,
            };
            rows.insert(id, place.clone());
            Ok(place)
        }

        async fn save(&self, place: &Place) -> Result<Place, ServiceError> {
            let name = models::place::validate_name(&place.name)?;
            let mut rows = self.rows.write().await;
            let Some(existing) = rows.get_mut(&place.id) else { return Err(ServiceError::not_found("place")); };
            *existing = Place { name, updated_at: Utc::now().into(), ..place.clone() };
            Ok(existing.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows.write().await.remove(&id).is_some())
        }
    }
}
