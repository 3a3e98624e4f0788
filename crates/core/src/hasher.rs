//! Password hashing capability.
//!
//! The directory never chooses a hashing algorithm itself; it is handed an
//! implementation of [`PasswordHasher`] at construction time.

use thiserror::Error;

use crate::types::PasswordCredential;

/// Errors raised by a [`PasswordHasher`].
#[derive(Debug, Error)]
#[error("password hashing error: {0}")]
pub struct HashError(pub String);

/// Turns plaintext passwords into opaque credentials and checks them later.
pub trait PasswordHasher: Send + Sync {
    /// Produce a credential for `password`.
    ///
    /// # Errors
    ///
    /// Returns `HashError` if the underlying algorithm fails.
    fn hash(&self, password: &str) -> Result<PasswordCredential, HashError>;

    /// Check `password` against a stored credential.
    ///
    /// Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    ///
    /// Returns `HashError` only when the stored credential is malformed.
    fn verify(&self, password: &str, credential: &PasswordCredential) -> Result<bool, HashError>;
}
