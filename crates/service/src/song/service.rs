use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{CreateParams, FilterValues, SearchFilters, Song, SongDetails, UpdateParams};
use super::metadata::MetadataClient;
use super::repository::SongRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Separator between verses of a song text.
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Catalog business service independent of web framework
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn SongRepository>,
    metadata: Arc<dyn MetadataClient>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn SongRepository>, metadata: Arc<dyn MetadataClient>) -> Self {
        Self { repo, metadata }
    }

    /// Validate and store a fully specified song.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::song::{CatalogService, domain::CreateParams};
    /// use service::song::repository::mock::MockSongRepository;
    /// use service::song::metadata::StaticMetadataClient;
    /// let svc = CatalogService::new(Arc::new(MockSongRepository::default()), Arc::new(StaticMetadataClient::default()));
    /// let params = CreateParams {
    ///     group: "Muse".into(),
    ///     name: "Uprising".into(),
    ///     release_date: "07.09.2009".into(),
    ///     text: "Paranoia is in bloom".into(),
    ///     link: "https://example.org/uprising".into(),
    /// };
    /// let song = tokio_test::block_on(svc.create(params)).unwrap();
    /// assert_eq!(song.id, 1);
    /// ```
    #[instrument(skip(self, params), fields(group = %params.group, name = %params.name))]
    pub async fn create(&self, params: CreateParams) -> Result<Song, ServiceError> {
        params.to_fields("service create")?;
        let song = self.repo.create(&params).await?;
        info!(id = song.id, "song_created");
        Ok(song)
    }

    /// Fill in a song from the upstream metadata lookup, then store it.
    #[instrument(skip(self, details), fields(group = %details.group, song = %details.name))]
    pub async fn create_from_details(&self, details: SongDetails) -> Result<Song, ServiceError> {
        details.validate()?;
        let detail = self.metadata.fetch(&details.group, &details.name).await?;
        self.create(CreateParams {
            group: details.group,
            name: details.name,
            release_date: detail.release_date,
            text: detail.text,
            link: detail.link,
        })
        .await
    }

    #[instrument(skip(self, params))]
    pub async fn update(&self, id: i32, params: UpdateParams) -> Result<Song, ServiceError> {
        params.to_fields("service update")?;
        let song = self.repo.update(id, &params).await?;
        info!(id, "song_updated");
        Ok(song)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!(id, "song_deleted");
        Ok(())
    }

    /// Verse `verse_number` (1-based) of song `id`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::errors::ErrorCode;
    /// use service::song::{CatalogService, domain::CreateParams};
    /// use service::song::repository::mock::MockSongRepository;
    /// use service::song::metadata::StaticMetadataClient;
    /// let svc = CatalogService::new(Arc::new(MockSongRepository::default()), Arc::new(StaticMetadataClient::default()));
    /// let song = tokio_test::block_on(svc.create(CreateParams {
    ///     group: "G".into(), name: "S".into(), release_date: "01.01.2000".into(),
    ///     text: "A\n\nB\n\nC".into(), link: "l".into(),
    /// })).unwrap();
    /// assert_eq!(tokio_test::block_on(svc.select_verse(song.id, 2)).unwrap(), "B");
    /// let err = tokio_test::block_on(svc.select_verse(song.id, 4)).unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::NotFound);
    /// ```
    #[instrument(skip(self))]
    pub async fn select_verse(&self, id: i32, verse_number: i64) -> Result<String, ServiceError> {
        if verse_number < 1 {
            return Err(ServiceError::InvalidArgument(format!("verse number must be >= 1, got {verse_number}")));
        }
        let text = self.repo.select_text(id).await?;
        let verses = split_verses(&text);
        let index = usize::try_from(verse_number)
            .ok()
            .filter(|n| *n <= verses.len())
            .ok_or_else(|| {
                ServiceError::NotFound(format!("song {id} has {} verses, verse {verse_number} requested", verses.len()))
            })?;
        Ok(verses[index - 1].to_string())
    }

    /// Reject repeated filter keys and negative paging, then run the search.
    #[instrument(skip(self, filter_values))]
    pub async fn search(&self, filter_values: &FilterValues, page_num: i64, per_page: i64) -> Result<Vec<Song>, ServiceError> {
        let mut filters = SearchFilters::new();
        for (key, values) in filter_values {
            match values.as_slice() {
                [] => {}
                [value] => {
                    filters.insert(key.clone(), value.clone());
                }
                _ => {
                    return Err(ServiceError::InvalidArgument(format!(
                        "filter {key} given {} values, at most one allowed",
                        values.len()
                    )))
                }
            }
        }
        let page = Pagination::from_request(page_num, per_page)?;
        let songs = self.repo.search(&filters, page.page_num, page.per_page).await?;
        info!(count = songs.len(), "songs_found");
        Ok(songs)
    }
}

/// Split on the exact blank-line separator; text without one is a single verse.
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_SEPARATOR).collect()
}
