//! HTTP middleware stack for the directory.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Bearer gate (route layer on protected routes only)

pub mod auth;
pub mod client_ip;
pub mod request_id;

pub use auth::require_bearer;
pub use client_ip::ClientIp;
pub use request_id::request_id_middleware;
