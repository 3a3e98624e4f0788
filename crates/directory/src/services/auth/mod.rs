//! Authentication primitives.
//!
//! Provides the Argon2id password hasher and bearer token issuance and
//! validation used by the directory service and the auth gate.

mod error;
pub mod hasher;
pub mod token;

pub use error::AuthError;
pub use hasher::Argon2Hasher;
pub use token::{BEARER_PREFIX, BearerToken, GateRejection, Token, TokenIssuer};
