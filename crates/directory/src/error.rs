//! HTTP error mapping with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as a JSON
//! body `{"error": "<message>"}`; server errors are captured to Sentry
//! before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::DirectoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the directory.
#[derive(Debug, Error)]
pub enum AppError {
    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Request rejected by the bearer gate.
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Directory(err) => match err {
                DirectoryError::BadRequest(_) => StatusCode::BAD_REQUEST,
                DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
                DirectoryError::Conflict => StatusCode::CONFLICT,
                DirectoryError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
                DirectoryError::Auth(_) | DirectoryError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Internal details are never exposed.
    fn public_message(&self) -> String {
        if self.status().is_server_error() {
            return "Internal server error".to_string();
        }
        match self {
            Self::Directory(DirectoryError::NotFound(_)) => "User not found".to_string(),
            Self::Directory(DirectoryError::Conflict) => {
                "User with this email already exists".to_string()
            }
            Self::Directory(DirectoryError::Auth(AuthError::InvalidCredentials)) => {
                "Invalid credentials".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use user_directory_core::UserId;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_codes_and_messages() {
        let cases = [
            (
                AppError::BadRequest("Email is required".to_string()),
                StatusCode::BAD_REQUEST,
                "Email is required",
            ),
            (
                AppError::Unauthorized,
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
            ),
            (
                DirectoryError::Auth(AuthError::InvalidCredentials).into(),
                StatusCode::UNAUTHORIZED,
                "Invalid credentials",
            ),
            (
                DirectoryError::NotFound(UserId::new(7)).into(),
                StatusCode::NOT_FOUND,
                "User not found",
            ),
            (
                DirectoryError::Conflict.into(),
                StatusCode::CONFLICT,
                "User with this email already exists",
            ),
            (
                DirectoryError::BadRequest("Invalid email format".to_string()).into(),
                StatusCode::BAD_REQUEST,
                "Invalid email format",
            ),
        ];

        for (err, status, message) in cases {
            let (got_status, body) = render(err).await;
            assert_eq!(got_status, status);
            assert_eq!(body, json!({ "error": message }));
        }
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let (status, body) = render(DirectoryError::Store(StoreError::IdsExhausted).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");

        let signing = DirectoryError::Auth(AuthError::TokenSigning("bad key length".to_string()));
        let (status, body) = render(signing.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }
}
