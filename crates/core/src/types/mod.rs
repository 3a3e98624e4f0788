//! Core types for the user directory.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;

pub use credential::PasswordCredential;
pub use email::{Email, EmailError};
pub use id::*;
