use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Place: listings filter by owner + visited and sort by name
        manager
            .create_index(
                Index::create()
                    .name("idx_place_user_visited_name")
                    .table(Place::Table)
                    .col(Place::UserId)
                    .col(Place::Visited)
                    .col(Place::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_place_user_visited_name")
                    .table(Place::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Place { Table, UserId, Visited, Name }
