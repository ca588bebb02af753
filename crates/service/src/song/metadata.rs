//! Upstream song metadata lookup consulted when a song is created from
//! just its group and title.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use configs::MetadataConfig;

use crate::errors::ServiceError;

/// Upstream response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetail {
    pub release_date: String,
    pub text: String,
    pub link: String,
}

#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Any failure, including a timeout, is a `BadGateway`.
    async fn fetch(&self, group: &str, song: &str) -> Result<SongDetail, ServiceError>;
}

/// `GET {endpoint}?group=..&song=..` with a whole-request timeout.
pub struct HttpMetadataClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpMetadataClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::storage("metadata client init", e))?;
        Ok(Self { http, endpoint: endpoint.into() })
    }

    pub fn from_config(cfg: &MetadataConfig) -> Result<Self, ServiceError> {
        Self::new(cfg.endpoint(), cfg.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MetadataClient for HttpMetadataClient {
    async fn fetch(&self, group: &str, song: &str) -> Result<SongDetail, ServiceError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "metadata request failed");
                ServiceError::gateway("metadata request", e)
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(endpoint = %self.endpoint, %status, "metadata lookup rejected");
            return Err(ServiceError::gateway("metadata lookup", format!("upstream answered {status}")));
        }

        let detail = resp
            .json::<SongDetail>()
            .await
            .map_err(|e| ServiceError::gateway("metadata decode", e))?;
        debug!(group, song, "metadata fetched");
        Ok(detail)
    }
}

/// Fixed in-memory lookup table keyed by `(group, song)`.
#[derive(Debug, Default, Clone)]
pub struct StaticMetadataClient {
    entries: HashMap<(String, String), SongDetail>,
}

impl StaticMetadataClient {
    pub fn with(mut self, group: &str, song: &str, detail: SongDetail) -> Self {
        self.entries.insert((group.to_string(), song.to_string()), detail);
        self
    }
}

#[async_trait]
impl MetadataClient for StaticMetadataClient {
    async fn fetch(&self, group: &str, song: &str) -> Result<SongDetail, ServiceError> {
        self.entries
            .get(&(group.to_string(), song.to_string()))
            .cloned()
            .ok_or_else(|| ServiceError::gateway("metadata lookup", format!("no details for {group} / {song}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn detail() -> SongDetail {
        SongDetail {
            release_date: "16.07.2006".into(),
            text: "Ooh baby, don't you know I suffer?".into(),
            link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".into(),
        }
    }

    fn client(server: &MockServer, timeout: Duration) -> HttpMetadataClient {
        HttpMetadataClient::new(format!("{}/info", server.uri()), timeout).unwrap()
    }

    #[tokio::test]
    async fn fetch_decodes_ok_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .and(query_param("group", "Muse"))
            .and(query_param("song", "Supermassive Black Hole"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "releaseDate": "16.07.2006",
                "text": "Ooh baby, don't you know I suffer?",
                "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let got = client(&server, Duration::from_secs(2))
            .fetch("Muse", "Supermassive Black Hole")
            .await
            .unwrap();
        assert_eq!(got, detail());
    }

    #[tokio::test]
    async fn non_ok_status_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(2)).fetch("Nobody", "Nothing").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadGateway);
    }

    #[tokio::test]
    async fn undecodable_body_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(2)).fetch("Muse", "Uprising").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadGateway);
    }

    #[tokio::test]
    async fn slow_upstream_times_out_as_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&detail()).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_millis(50)).fetch("Muse", "Uprising").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadGateway);
    }

    #[tokio::test]
    async fn static_client_answers_known_pairs_only() {
        let c = StaticMetadataClient::default().with("Muse", "Supermassive Black Hole", detail());
        assert_eq!(c.fetch("Muse", "Supermassive Black Hole").await.unwrap(), detail());
        assert_eq!(c.fetch("Muse", "Uprising").await.unwrap_err().code(), ErrorCode::BadGateway);
    }
}
