use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use common::types::ErrorBody;
use service::errors::{ErrorCode, ServiceError};

/// Transport-facing failure: a status plus a single message field.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    /// The only place a domain error code becomes an HTTP status.
    pub fn from_service(op: &str, err: ServiceError) -> Self {
        let status = status_for(err.code());
        let message = format!("{op} failed: {err}");
        if status.is_server_error() {
            error!(op, code = err.code().as_str(), error = %err, "request failed");
        } else {
            warn!(op, code = err.code().as_str(), error = %err, "request rejected");
        }
        Self { status, message }
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::BadGateway => StatusCode::BAD_GATEWAY,
        ErrorCode::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "request body rejected");
        Self::bad_request(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_statuses() {
        assert_eq!(status_for(ErrorCode::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::BadGateway), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(ErrorCode::Unknown), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_carries_operation_context() {
        let e = ApiError::from_service("delete", ServiceError::not_found("song", 3));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "delete failed: not found: song with id 3 not found");
    }
}
