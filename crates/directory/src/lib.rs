//! User directory service library.
//!
//! An in-memory user directory over HTTP: password login issuing bearer
//! tokens, registration, and redacted reads behind a bearer gate. Exposed
//! as a library so the router can be exercised in-process by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
