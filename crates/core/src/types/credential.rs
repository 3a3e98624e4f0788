//! Password credential type.
//!
//! Wraps the opaque value produced by a [`crate::PasswordHasher`].

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Opaque password credential (for example an Argon2 PHC string).
///
/// The value is write-only from the API's point of view: it is set when a
/// user is created and compared at login. It deliberately does not implement
/// `Serialize`, and `Debug` never prints the inner value.
#[derive(Clone)]
pub struct PasswordCredential(SecretString);

impl PasswordCredential {
    /// Wrap a credential string produced by a hasher.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Expose the credential for verification or record building.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordCredential([REDACTED])")
    }
}
