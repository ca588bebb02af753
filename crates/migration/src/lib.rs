//! Migrator registering the catalog schema migrations in order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_songs;
mod m20240901_000002_add_song_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_songs::Migration),
            // Indexes should always be applied last
            Box::new(m20240901_000002_add_song_indexes::Migration),
        ]
    }
}
