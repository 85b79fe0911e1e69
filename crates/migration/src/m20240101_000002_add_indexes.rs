//! Index `interviews.updated_at` for the recency-ordered listing.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_interviews_updated_at")
                    .table(Interviews::Table)
                    .col(Interviews::UpdatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_interviews_updated_at")
                    .table(Interviews::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Interviews { Table, UpdatedAt }
