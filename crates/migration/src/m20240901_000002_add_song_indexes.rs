use sea_orm_migration::prelude::*;

use crate::m20240901_000001_create_songs::Songs;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Search always sorts by group name
        manager
            .create_index(
                Index::create()
                    .name("idx_songs_group_name")
                    .table(Songs::Table)
                    .col(Songs::GroupName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_songs_song_name")
                    .table(Songs::Table)
                    .col(Songs::SongName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_songs_group_name").table(Songs::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_songs_song_name").table(Songs::Table).to_owned())
            .await
    }
}
