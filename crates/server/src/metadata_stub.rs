//! Development stand-in for the upstream song metadata service.
//!
//! Answers `GET /info?group=..&song=..` from a fixed table; unknown pairs
//! and missing parameters get a 400.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use common::types::ErrorBody;
use service::song::metadata::SongDetail;

type Catalog = Arc<HashMap<(String, String), SongDetail>>;

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub group: Option<String>,
    pub song: Option<String>,
}

fn detail(release_date: &str, text: &str) -> SongDetail {
    SongDetail {
        release_date: release_date.to_string(),
        text: text.to_string(),
        link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_string(),
    }
}

/// The songs the stub knows about.
pub fn seed() -> HashMap<(String, String), SongDetail> {
    let mut songs = HashMap::new();
    songs.insert(
        ("Muse".to_string(), "Supermassive Black Hole".to_string()),
        detail(
            "16.07.2006",
            "Ooh baby, don't you know I suffer?\nOoh baby, can you hear me moan?\n\
             You caught me under false pretenses\nHow long before you let me go?\n\n\
             Ooh\nYou set my soul alight\nOoh\nYou set my soul alight",
        ),
    );
    songs.insert(("Group2".to_string(), "Song2".to_string()), detail("27.02.2015", "Text2\n\nText22"));
    songs.insert(("Group3".to_string(), "Song3".to_string()), detail("20.01.2010", "Text3\n\nText33"));
    songs
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message.to_string() })).into_response()
}

async fn info(State(songs): State<Catalog>, Query(q): Query<InfoQuery>) -> Response {
    let (Some(group), Some(song)) = (q.group, q.song) else {
        return bad_request("group and song query parameters are required");
    };
    match songs.get(&(group.clone(), song.clone())) {
        Some(d) => {
            debug!(%group, %song, "stub lookup hit");
            Json(d.clone()).into_response()
        }
        None => {
            debug!(%group, %song, "stub lookup miss");
            bad_request("unknown song")
        }
    }
}

pub fn router(songs: HashMap<(String, String), SongDetail>) -> Router {
    Router::new()
        .route("/info", get(info))
        .with_state(Arc::new(songs))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "metadata stub listening");
    axum::serve(listener, router(seed())).await?;
    Ok(())
}
