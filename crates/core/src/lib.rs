//! User Directory Core - Shared types library.
//!
//! This crate provides the pieces of the user directory that carry no state
//! and perform no I/O:
//! - `types` - Newtype wrappers for user IDs, emails and password credentials
//! - `hasher` - The `PasswordHasher` capability the directory consumes
//! - `redaction` - The transform every record passes through before leaving
//!   the service boundary
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no I/O, no
//! locking, no HTTP. The `user-directory` crate owns the store, tokens and
//! routes and depends on this one.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod hasher;
pub mod redaction;
pub mod types;

pub use hasher::{HashError, PasswordHasher};
pub use redaction::{PRIVATE_FIELDS, Redacted, SENSITIVE_FIELDS, redact, redact_all};
pub use types::*;
