//! Business logic services for the directory.
//!
//! # Services
//!
//! - `auth` - Password hashing and bearer tokens
//! - `directory` - Login, registration, lookup and listing over the store

pub mod auth;
pub mod directory;

pub use directory::{DirectoryError, DirectoryService};
