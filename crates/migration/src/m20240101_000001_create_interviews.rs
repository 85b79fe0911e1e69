//! Create the `interviews` table.
//!
//! One row per client-assigned id; the payload column holds the JSON text.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Interviews::Table)
                    .if_not_exists()
                    .col(string(Interviews::Id).primary_key())
                    .col(text(Interviews::Payload).not_null())
                    .col(timestamp_with_time_zone(Interviews::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Interviews::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Interviews::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Interviews { Table, Id, Payload, CreatedAt, UpdatedAt }
