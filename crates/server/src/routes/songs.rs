use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::song::domain::{filter_values_from_pairs, Song, SongDetails, UpdateParams, Verse};

use crate::errors::ApiError;
use crate::metrics;
use crate::state::ServerState;

fn parse_param<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ApiError::bad_request(format!("invalid {name}: {raw:?}")))
}

#[utoipa::path(post, path = "/songs", tag = "songs",
    request_body = crate::openapi::SongDetailsDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SongDoc),
        (status = 400, description = "Bad request", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Internal error", body = crate::openapi::ErrorBodyDoc),
        (status = 502, description = "Bad gateway", body = crate::openapi::ErrorBodyDoc)
    ))]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<SongDetails>, JsonRejection>,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let Json(details) = body?;
    let started = Instant::now();
    let res = state.catalog.create_from_details(details).await;
    metrics::record("create", &res, started.elapsed().as_secs_f64());
    let song = res.map_err(|e| ApiError::from_service("create", e))?;
    info!(id = song.id, "POST /songs ok, record created");
    Ok((StatusCode::CREATED, Json(song)))
}

#[utoipa::path(put, path = "/songs/{id}", tag = "songs",
    params(("id" = i32, Path, description = "Song ID")),
    request_body = crate::openapi::UpdateParamsDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SongDoc),
        (status = 400, description = "Bad request", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Internal error", body = crate::openapi::ErrorBodyDoc)
    ))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateParams>, JsonRejection>,
) -> Result<Json<Song>, ApiError> {
    let id: i32 = parse_param("id", &id)?;
    let Json(params) = body?;
    let started = Instant::now();
    let res = state.catalog.update(id, params).await;
    metrics::record("update", &res, started.elapsed().as_secs_f64());
    let song = res.map_err(|e| ApiError::from_service("update", e))?;
    info!(id, "PUT /songs ok, record updated");
    Ok(Json(song))
}

#[utoipa::path(delete, path = "/songs/{id}", tag = "songs",
    params(("id" = i32, Path, description = "Song ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Bad request", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Internal error", body = crate::openapi::ErrorBodyDoc)
    ))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id: i32 = parse_param("id", &id)?;
    let started = Instant::now();
    let res = state.catalog.delete(id).await;
    metrics::record("delete", &res, started.elapsed().as_secs_f64());
    res.map_err(|e| ApiError::from_service("delete", e))?;
    info!(id, "DELETE /songs ok, record deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/songs/{id}/verse/{vid}", tag = "songs",
    params(
        ("id" = i32, Path, description = "Song ID"),
        ("vid" = i64, Path, description = "Verse number, starting from 1")
    ),
    responses(
        (status = 200, description = "Verse", body = crate::openapi::VerseDoc),
        (status = 400, description = "Bad request", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Internal error", body = crate::openapi::ErrorBodyDoc)
    ))]
pub async fn get_verse(
    State(state): State<ServerState>,
    Path((id, vid)): Path<(String, String)>,
) -> Result<Json<Verse>, ApiError> {
    let id: i32 = parse_param("id", &id)?;
    let vid: i64 = parse_param("vid", &vid)?;
    let started = Instant::now();
    let res = state.catalog.select_verse(id, vid).await;
    metrics::record("select_verse", &res, started.elapsed().as_secs_f64());
    let text = res.map_err(|e| ApiError::from_service("get verse", e))?;
    info!(id, vid, "GET verse ok, text selected");
    Ok(Json(Verse { num: vid.to_string(), text }))
}

#[utoipa::path(get, path = "/songs/page/{page_num}/records/{per_page}", tag = "songs",
    params(
        ("page_num" = i64, Path, description = "Page number, starting from 0"),
        ("per_page" = i64, Path, description = "Records per page"),
        ("group_name" = Option<String>, Query, description = "Exact group name"),
        ("song_name" = Option<String>, Query, description = "Exact song name"),
        ("release_date" = Option<String>, Query, description = "Release date, DD.MM.YYYY"),
        ("song_text" = Option<String>, Query, description = "Exact song text"),
        ("link" = Option<String>, Query, description = "Exact link")
    ),
    responses(
        (status = 200, description = "Matching songs", body = [crate::openapi::SongDoc]),
        (status = 400, description = "Bad request", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Internal error", body = crate::openapi::ErrorBodyDoc)
    ))]
pub async fn search(
    State(state): State<ServerState>,
    Path((page_num, per_page)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Song>>, ApiError> {
    let page_num: i64 = parse_param("page_num", &page_num)?;
    let per_page: i64 = parse_param("per_page", &per_page)?;
    let filters = filter_values_from_pairs(pairs);
    let started = Instant::now();
    let res = state.catalog.search(&filters, page_num, per_page).await;
    metrics::record("search", &res, started.elapsed().as_secs_f64());
    let songs = res.map_err(|e| ApiError::from_service("search", e))?;
    info!(count = songs.len(), page_num, per_page, "GET /songs/page ok, records found");
    Ok(Json(songs))
}
