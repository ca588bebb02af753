use async_trait::async_trait;

use super::domain::{CreateParams, SearchFilters, Song, UpdateParams};
use crate::errors::ServiceError;

/// Persistence contract for catalog records.
///
/// Implementations own the mapping to storage rows and translate every
/// storage failure into a [`ServiceError`].
#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn create(&self, params: &CreateParams) -> Result<Song, ServiceError>;
    /// Fails with `NotFound` unless exactly one row was removed.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    /// Fails with `NotFound` unless exactly one row was changed.
    async fn update(&self, id: i32, params: &UpdateParams) -> Result<Song, ServiceError>;
    async fn select_text(&self, id: i32) -> Result<String, ServiceError>;
    /// One page ordered by group name; an empty page is `NotFound`.
    async fn search(&self, filters: &SearchFilters, page_num: u64, per_page: u64) -> Result<Vec<Song>, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    use crate::pagination::Pagination;
    use crate::song::query::SEARCH_FIELDS;

    #[derive(Default)]
    struct State {
        next_id: i32,
        rows: BTreeMap<i32, Song>,
    }

    /// Behaves like the storage-backed repository, including the
    /// not-found rules and filter semantics.
    #[derive(Default)]
    pub struct MockSongRepository {
        state: Mutex<State>,
        calls: AtomicUsize,
        unavailable: AtomicBool,
    }

    impl MockSongRepository {
        /// Make every subsequent call fail as a storage outage would.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Number of repository calls observed so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn len(&self) -> usize {
            self.lock().rows.len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        fn enter(&self, op: &str) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::storage(op, "connection refused"));
            }
            Ok(())
        }
    }

    fn column<'a>(song: &'a Song, field: &str) -> Option<std::borrow::Cow<'a, str>> {
        use std::borrow::Cow;
        match field {
            "group_name" => Some(Cow::Borrowed(song.group.as_str())),
            "song_name" => Some(Cow::Borrowed(song.name.as_str())),
            "release_date" => Some(Cow::Owned(models::song::format_release_date(&song.release_date))),
            "song_text" => Some(Cow::Borrowed(song.text.as_str())),
            "link" => Some(Cow::Borrowed(song.link.as_str())),
            _ => None,
        }
    }

    #[async_trait]
    impl SongRepository for MockSongRepository {
        async fn create(&self, params: &CreateParams) -> Result<Song, ServiceError> {
            self.enter("repo create")?;
            let fields = params.to_fields("repo create")?;
            let mut state = self.lock();
            state.next_id += 1;
            let song = Song::from_fields(state.next_id, fields);
            state.rows.insert(song.id, song.clone());
            Ok(song)
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.enter("repo delete")?;
            match self.lock().rows.remove(&id) {
                Some(_) => Ok(()),
                None => Err(ServiceError::not_found("song", id)),
            }
        }

        async fn update(&self, id: i32, params: &UpdateParams) -> Result<Song, ServiceError> {
            self.enter("repo update")?;
            let fields = params.to_fields("repo update")?;
            let mut state = self.lock();
            let slot = state.rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("song", id))?;
            *slot = Song::from_fields(id, fields);
            Ok(slot.clone())
        }

        async fn select_text(&self, id: i32) -> Result<String, ServiceError> {
            self.enter("repo select text")?;
            self.lock()
                .rows
                .get(&id)
                .map(|s| s.text.clone())
                .ok_or_else(|| ServiceError::not_found("song", id))
        }

        async fn search(&self, filters: &SearchFilters, page_num: u64, per_page: u64) -> Result<Vec<Song>, ServiceError> {
            self.enter("repo search")?;
            let (limit, offset) = Pagination { page_num, per_page }.window()?;

            let mut wanted: Vec<(&str, String)> = Vec::new();
            for field in SEARCH_FIELDS {
                let Some(raw) = filters.get(field).filter(|v| !v.is_empty()) else { continue };
                let value = if field == "release_date" {
                    let date = models::song::parse_release_date(raw)
                        .map_err(|e| ServiceError::model("search filter", e))?;
                    models::song::format_release_date(&date)
                } else {
                    raw.clone()
                };
                wanted.push((field, value));
            }

            let state = self.lock();
            let mut matches: Vec<&Song> = state
                .rows
                .values()
                .filter(|song| wanted.iter().all(|(f, v)| column(song, f).is_some_and(|c| c == v.as_str())))
                .collect();
            matches.sort_by(|a, b| a.group.cmp(&b.group).then(a.id.cmp(&b.id)));

            let page: Vec<Song> = matches
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect();
            if page.is_empty() {
                return Err(ServiceError::NotFound("no songs match the search".into()));
            }
            Ok(page)
        }
    }
}
