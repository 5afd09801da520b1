//! Create `place` table with FK to `user`.
//!
//! `photo` holds the blob name of an uploaded picture; the blob itself lives
//! in the media store, not in the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Place::Table)
                    .if_not_exists()
                    .col(pk_auto(Place::Id))
                    .col(uuid(Place::UserId).not_null())
                    .col(string_len(Place::Name, 200).not_null())
                    .col(boolean(Place::Visited).not_null().default(false))
                    .col(ColumnDef::new(Place::Notes).text().null())
                    .col(ColumnDef::new(Place::DateVisited).date().null())
                    .col(ColumnDef::new(Place::Photo).string_len(255).null())
                    .col(timestamp_with_time_zone(Place::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Place::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_place_user")
                            .from(Place::Table, Place::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Place::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Place {
    Table,
    Id,
    UserId,
    Name,
    Visited,
    Notes,
    DateVisited,
    Photo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
