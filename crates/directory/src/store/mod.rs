//! In-memory storage for the directory.
//!
//! # Layout
//!
//! - `users` - The credential store: user records keyed by `UserId`, plus
//!   the ID counter
//!
//! The store lives for the lifetime of the process. Nothing is persisted; a
//! restart clears every record except an optional seed user preloaded at
//! startup.

pub mod users;

use thiserror::Error;

pub use users::UserStore;

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same unique key already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The ID space is exhausted.
    #[error("user id space exhausted")]
    IdsExhausted,
}
