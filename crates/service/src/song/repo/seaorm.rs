use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait};
use tracing::debug;

use models::song as song_model;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::song::domain::{CreateParams, SearchFilters, Song, UpdateParams};
use crate::song::query::{SearchQuery, SEARCH_FIELDS, SELECT_SONGS};
use crate::song::repository::SongRepository;

pub struct SeaOrmSongRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSongRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl SongRepository for SeaOrmSongRepository {
    async fn create(&self, params: &CreateParams) -> Result<Song, ServiceError> {
        let fields = params.to_fields("repo create")?;
        let created = song_model::create(&self.db, &fields)
            .await
            .map_err(|e| ServiceError::model("repo create", e))?;
        debug!(id = created.id, op = "create", "song row inserted");
        Ok(Song::from(created))
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let affected = song_model::delete(&self.db, id)
            .await
            .map_err(|e| ServiceError::model("repo delete", e))?;
        debug!(id, op = "delete", affected, "song delete executed");
        if affected != 1 {
            return Err(ServiceError::not_found("song", id));
        }
        Ok(())
    }

    async fn update(&self, id: i32, params: &UpdateParams) -> Result<Song, ServiceError> {
        let fields = params.to_fields("repo update")?;
        let affected = song_model::update(&self.db, id, &fields)
            .await
            .map_err(|e| ServiceError::model("repo update", e))?;
        debug!(id, op = "update", affected, "song update executed");
        if affected != 1 {
            return Err(ServiceError::not_found("song", id));
        }
        Ok(Song::from_fields(id, fields))
    }

    async fn select_text(&self, id: i32) -> Result<String, ServiceError> {
        let text = song_model::find_text(&self.db, id)
            .await
            .map_err(|e| ServiceError::model("repo select text", e))?;
        debug!(id, op = "select_text", found = text.is_some(), "song text fetched");
        text.ok_or_else(|| ServiceError::not_found("song", id))
    }

    async fn search(&self, filters: &SearchFilters, page_num: u64, per_page: u64) -> Result<Vec<Song>, ServiceError> {
        let (limit, offset) = Pagination { page_num, per_page }.window()?;
        let query = SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, limit, offset, filters)?;
        let constraints = query.constraint_count();
        let rows = song_model::Entity::find()
            .from_raw_sql(query.into_statement(self.db.get_database_backend()))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::storage("repo search", e))?;
        debug!(op = "search", constraints, limit, offset, count = rows.len(), "song search executed");
        if rows.is_empty() {
            return Err(ServiceError::NotFound("no songs match the search".into()));
        }
        Ok(rows.into_iter().map(Song::from).collect())
    }
}
