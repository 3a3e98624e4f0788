//! Domain models for the directory.

pub mod user;

pub use user::{NewUser, User};
