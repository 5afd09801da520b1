/// CRUD tests for user, credentials and place entities against an in-memory SQLite database.
use crate::db::{connect_with_config, DatabaseConfig};
use crate::{errors::ModelError, place, user, user_credentials};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let cfg = DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_user_create_and_lookup() -> Result<()> {
    let db = setup_test_db().await?;

    let created = user::create(&db, "alice").await?;
    let found = user::find_by_username(&db, "alice").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    assert!(user::find_by_username(&db, "nobody").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_username_rejected() -> Result<()> {
    let db = setup_test_db().await?;

    user::create(&db, "bob").await?;
    let dup = user::create(&db, "bob").await;
    assert!(matches!(dup, Err(ModelError::Db(_))));
    Ok(())
}

#[tokio::test]
async fn test_credentials_upsert_replaces_hash() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, "carol").await?;

    let first = user_credentials::upsert_password(&db, u.id, "hash-1".into(), "argon2").await?;
    let second = user_credentials::upsert_password(&db, u.id, "hash-2".into(), "argon2").await?;
    assert_eq!(first.id, second.id);

    let stored = user_credentials::find_by_user(&db, u.id).await?.unwrap();
    assert_eq!(stored.password_hash, "hash-2");

    let empty = user_credentials::upsert_password(&db, u.id, "  ".into(), "argon2").await;
    assert!(matches!(empty, Err(ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_place_crud_and_ordering() -> Result<()> {
    let db = setup_test_db().await?;
    let owner = user::create(&db, "dana").await?;
    let other = user::create(&db, "erin").await?;

    let tokyo = place::create(&db, owner.id, "Tokyo", false).await?;
    place::create(&db, owner.id, "New York", false).await?;
    place::create(&db, owner.id, "Moab", true).await?;
    place::create(&db, other.id, "Lima", false).await?;

    assert!(tokyo.id > 0);
    assert!(!tokyo.visited);
    assert!(tokyo.is_owned_by(owner.id));

    let wishlist = place::list_for_owner(&db, owner.id, Some(false)).await?;
    let names: Vec<_> = wishlist.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["New York", "Tokyo"]);

    let visited = place::list_for_owner(&db, owner.id, Some(true)).await?;
    assert_eq!(visited.len(), 1);
    assert_eq!(visited[0].name, "Moab");

    let all = place::list_for_owner(&db, owner.id, None).await?;
    assert_eq!(all.len(), 3);

    // save writes every mutable column
    let mut changed = tokyo.clone();
    changed.visited = true;
    changed.notes = Some("cool".into());
    changed.date_visited = chrono::NaiveDate::from_ymd_opt(2024, 4, 1);
    changed.photo = Some("user_images/a.png".into());
    let saved = place::save(&db, &changed).await?;
    assert!(saved.visited);
    assert_eq!(saved.notes.as_deref(), Some("cool"));

    let reloaded = place::Entity::find_by_id(tokyo.id).one(&db).await?.unwrap();
    assert_eq!(reloaded.photo.as_deref(), Some("user_images/a.png"));
    assert_eq!(reloaded.date_visited, chrono::NaiveDate::from_ymd_opt(2024, 4, 1));
    assert_eq!(reloaded.user_id, owner.id);
    Ok(())
}

#[tokio::test]
async fn test_place_create_validates_name() -> Result<()> {
    let db = setup_test_db().await?;
    let owner = user::create(&db, "frank").await?;

    let blank = place::create(&db, owner.id, "", false).await;
    assert!(matches!(blank, Err(ModelError::Validation(_))));

    let long = place::create(&db, owner.id, &"x".repeat(201), false).await;
    assert!(matches!(long, Err(ModelError::Validation(_))));

    assert!(place::list_for_owner(&db, owner.id, None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_hard_delete_user_reports_missing() -> Result<()> {
    let db = setup_test_db().await?;
    let u = user::create(&db, "gina").await?;
    assert!(user::hard_delete(&db, u.id).await?);
    assert!(!user::hard_delete(&db, Uuid::new_v4()).await?);
    Ok(())
}
