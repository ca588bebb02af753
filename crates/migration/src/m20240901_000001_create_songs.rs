//! Create `songs` table.
//! One row per catalog record; `id` is a serial key assigned by the database.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Songs::Table)
                    .if_not_exists()
                    .col(pk_auto(Songs::Id))
                    .col(string_len(Songs::GroupName, 255).not_null())
                    .col(string_len(Songs::SongName, 255).not_null())
                    .col(date(Songs::ReleaseDate).not_null())
                    .col(text(Songs::SongText).not_null())
                    .col(string_len(Songs::Link, 1024).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Songs::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Songs {
    Table,
    Id,
    GroupName,
    SongName,
    ReleaseDate,
    SongText,
    Link,
}
