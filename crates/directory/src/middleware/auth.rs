//! Bearer gate for protected routes.
//!
//! Installed with `route_layer` so unmatched paths still 404. The gate checks
//! the header shape only; it does not resolve the token to a user.

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::services::auth::{GateRejection, TokenIssuer};

/// Reject the request with 401 unless it carries `Authorization: Bearer <token>`.
///
/// The wrapped handler never runs for a rejected request.
pub async fn require_bearer(request: Request, next: Next) -> Response {
    if let Err(rejection) = check_authorization(&request) {
        tracing::debug!(
            reason = %rejection,
            path = %request.uri().path(),
            "Rejected request at bearer gate"
        );
        return AppError::Unauthorized.into_response();
    }

    next.run(request).await
}

fn check_authorization(request: &Request) -> Result<(), GateRejection> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| GateRejection::UnsupportedScheme)
        })
        .transpose()?;

    TokenIssuer::validate(header).map(|_| ())
}
