//! User registration, lookup and listing.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

use user_directory_core::{Redacted, UserId};

use crate::error::{AppError, Result};
use crate::middleware::ClientIp;
use crate::services::directory::{RegisterInput, UserList};
use crate::state::AppState;

/// Query parameters accepted by the read routes.
#[derive(Debug, Default, Deserialize)]
pub struct ReadOptions {
    /// Keep private fields (`created_ip`, `internal_notes`) in the output.
    #[serde(default)]
    pub include_private: bool,
}

fn read_options(
    query: std::result::Result<Query<ReadOptions>, QueryRejection>,
) -> Result<ReadOptions> {
    query
        .map(|Query(options)| options)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Register a new user. Responds 201 with the redacted record.
pub async fn register(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    body: std::result::Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Redacted>)> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable registration body");
        AppError::BadRequest("Request body required".to_string())
    })?;

    let user = state.directory().register(input, client_ip).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Fetch one user by ID.
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<i32>, PathRejection>,
    query: std::result::Result<Query<ReadOptions>, QueryRejection>,
) -> Result<Json<Redacted>> {
    let Path(id) = id.map_err(|_| AppError::BadRequest("Invalid user id".to_string()))?;
    let options = read_options(query)?;

    let user = state
        .directory()
        .get_by_id(UserId::new(id), options.include_private)
        .await?;
    Ok(Json(user))
}

/// List every user in ascending ID order.
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<ReadOptions>, QueryRejection>,
) -> Result<Json<UserList>> {
    let options = read_options(query)?;
    Ok(Json(state.directory().list(options.include_private).await))
}
