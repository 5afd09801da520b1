#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

/// Fresh, migrated in-memory SQLite database for the calling test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Each in-memory database lives as long as its single pooled connection
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
