use crate::crypto::AuthError;
use crate::storage::StorageError;
use thiserror::Error;

/// Failures a service operation can report. The HTTP layer maps each to a status code.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested identifier does not resolve to a stored entity.
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
