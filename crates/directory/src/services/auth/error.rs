//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing or verification failed.
    #[error(transparent)]
    PasswordHash(#[from] user_directory_core::HashError),

    /// Token signing failed.
    #[error("token signing error: {0}")]
    TokenSigning(String),
}
