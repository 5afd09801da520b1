use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::place;
use crate::errors::ServiceError;
use crate::place::domain::Place;
use crate::place::repository::PlaceRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmPlaceRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl PlaceRepository for SeaOrmPlaceRepository {
    async fn get(&self, id: i32) -> Result<Option<Place>, ServiceError> {
        place::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn list_for_owner(&self, owner: Uuid, visited: Option<bool>) -> Result<Vec<Place>, ServiceError> {
        Ok(place::list_for_owner(&self.db, owner, visited).await?)
    }

    async fn create(&self, owner: Uuid, name: &str, visited: bool) -> Result<Place, ServiceError> {
        Ok(place::create(&self.db, owner, name, visited).await?)
    }

    async fn save(&self, p: &Place) -> Result<Place, ServiceError> {
        Ok(place::save(&self.db, p).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = place::Entity::delete_by_id(id).exec(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
