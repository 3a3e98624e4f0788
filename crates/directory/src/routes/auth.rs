//! Login route.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::error::{AppError, Result};
use crate::services::directory::{LoginInput, LoginOutcome};
use crate::state::AppState;

/// Exchange email and password for a bearer token and the redacted user.
///
/// A missing or unparseable body is treated like missing fields.
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginOutcome>> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable login body");
        AppError::BadRequest("Email and password required".to_string())
    })?;

    let outcome = state.directory().login(input).await?;
    Ok(Json(outcome))
}
