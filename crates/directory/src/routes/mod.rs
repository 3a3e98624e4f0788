//! HTTP route handlers for the directory.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Auth
//! POST /auth/login             - Exchange email and password for a token
//!
//! # Users
//! POST /users                  - Register (gated when configured)
//! GET  /users                  - List users (requires bearer)
//! GET  /users/{id}             - Fetch one user (requires bearer)
//! ```

pub mod auth;
pub mod health;
pub mod users;

use axum::{
    Router,
    middleware::from_fn,
    routing::{MethodRouter, get, post},
};

use crate::middleware::{request_id_middleware, require_bearer};
use crate::state::AppState;

/// Create the user routes router.
///
/// The gate is a per-method route layer, so `POST /users` stays open unless
/// `require_auth_for_registration` is set.
pub fn user_routes(require_auth_for_registration: bool) -> Router<AppState> {
    let collection: MethodRouter<AppState> = if require_auth_for_registration {
        get(users::list)
            .post(users::register)
            .route_layer(from_fn(require_bearer))
    } else {
        get(users::list)
            .route_layer(from_fn(require_bearer))
            .post(users::register)
    };

    Router::new()
        .route("/users", collection)
        .route(
            "/users/{id}",
            get(users::show).route_layer(from_fn(require_bearer)),
        )
}

/// Create all routes for the directory.
pub fn routes(require_auth_for_registration: bool) -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .merge(user_routes(require_auth_for_registration))
}

/// Build the application with state and request IDs applied.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    routes(state.config().require_auth_for_registration)
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
