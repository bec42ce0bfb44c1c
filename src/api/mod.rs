use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ConnectionRecord;

pub mod http;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a backend call, as raised by the transport layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success HTTP status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    /// No HTTP response was observed (connect failure, timeout, bad body).
    #[error("request failed: {0}")]
    Transport(String),
}

/// Semantic classification of an [`ApiError`].
///
/// A duplicate is not a caller error: the desired end state (a connection
/// with that identity existing) is already satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    DuplicateConflict,
    ServerError,
    NetworkError,
}

impl ApiError {
    /// Decide the failure kind once; callers never re-inspect status codes.
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Status { status: 409, .. } => FailureKind::DuplicateConflict,
            ApiError::Status { .. } => FailureKind::ServerError,
            ApiError::Transport(_) => FailureKind::NetworkError,
        }
    }
}

/// Backend-facing connection operations. The backend owns persistence and
/// is the source of truth for conflict detection; `create_connection` fails
/// with a 409 status when the connection already exists for the account.
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn create_connection(
        &self,
        dsn: &str,
        name: &str,
        is_sample: bool,
    ) -> ApiResult<ConnectionRecord>;
    async fn list_connections(&self) -> ApiResult<Vec<ConnectionRecord>>;
    async fn get_connection(&self, id: Uuid) -> ApiResult<ConnectionRecord>;
    async fn delete_connection(&self, id: Uuid) -> ApiResult<()>;
}
