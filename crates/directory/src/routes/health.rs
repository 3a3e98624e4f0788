//! Health check.

use axum::Json;
use serde_json::{Value, json};

/// Service name reported by the health probe; existing monitors match on it.
const SERVICE_NAME: &str = "user-service";

/// Liveness probe. Needs no auth and touches no state.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}
