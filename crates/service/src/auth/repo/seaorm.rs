use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_username(&self.db, username).await?;
        Ok(res.map(|u| AuthUser { id: u.id, username: u.username }))
    }

    async fn create_user(&self, username: &str) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, username).await?;
        Ok(AuthUser { id: created.id, username: created.username })
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, AuthError> {
        Ok(models::user::hard_delete(&self.db, user_id).await?)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm).await?;
        Ok(Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_auth_repository_roundtrip() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmAuthRepository { db: db.clone() };

        let u = repo.create_user("traveller").await?;
        assert_eq!(repo.find_user_by_username("traveller").await?, Some(u.clone()));

        repo.upsert_password(u.id, "$argon2id$fake".into(), "argon2".into()).await?;
        let creds = repo.get_credentials(u.id).await?.unwrap();
        assert_eq!(creds.password_algorithm, "argon2");

        assert!(repo.delete_user(u.id).await?);
        assert!(repo.find_user_by_username("traveller").await?.is_none());
        assert!(repo.get_credentials(u.id).await?.is_none());
        Ok(())
    }
}
