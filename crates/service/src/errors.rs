use std::fmt::Display;

use thiserror::Error;

use models::errors::ModelError;

/// Domain error kind, carried independently of any transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    BadGateway,
    Unknown,
}

impl ErrorCode {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "invalid_argument",
            ErrorCode::NotFound => "not_found",
            ErrorCode::BadGateway => "bad_gateway",
            ErrorCode::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad gateway: {0}")]
    BadGateway(String),
    #[error("storage error: {0}")]
    Unknown(String),
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            ServiceError::NotFound(_) => ErrorCode::NotFound,
            ServiceError::BadGateway(_) => ErrorCode::BadGateway,
            ServiceError::Unknown(_) => ErrorCode::Unknown,
        }
    }

    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} with id {id} not found"))
    }

    pub fn invalid(context: &str, err: impl Display) -> Self {
        Self::InvalidArgument(format!("{context}: {err}"))
    }

    pub fn storage(context: &str, err: impl Display) -> Self {
        Self::Unknown(format!("{context}: {err}"))
    }

    pub fn gateway(context: &str, err: impl Display) -> Self {
        Self::BadGateway(format!("{context}: {err}"))
    }

    /// Wrap a model-layer failure: validation problems are caller input errors,
    /// everything else is a storage failure.
    pub fn model(context: &str, err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => Self::InvalidArgument(format!("{context}: {msg}")),
            ModelError::Db(msg) => Self::Unknown(format!("{context}: {msg}")),
        }
    }
}
