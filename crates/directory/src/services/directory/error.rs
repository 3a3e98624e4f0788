//! Directory service error types.

use thiserror::Error;

use user_directory_core::UserId;

use crate::services::auth::AuthError;
use crate::store::StoreError;

/// Errors returned by directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Missing, empty or malformed input.
    #[error("{0}")]
    BadRequest(String),

    /// No user with the requested ID.
    #[error("user {0} not found")]
    NotFound(UserId),

    /// The email is already registered.
    #[error("user with this email already exists")]
    Conflict,

    /// Authentication failed, including bad credentials.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Store failure other than a conflict.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => Self::Conflict,
            other => Self::Store(other),
        }
    }
}
