//! Argon2id implementation of the `PasswordHasher` capability.

use argon2::{
    Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier,
    password_hash::{Error as PasswordHashError, SaltString},
};
use rand_core::OsRng;

use user_directory_core::{HashError, PasswordCredential, PasswordHasher};

/// Hashes passwords with Argon2id (default parameters, random salt) and
/// stores them as PHC strings.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Create a hasher with the library's default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordCredential, HashError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordCredential::new(hash.to_string()))
            .map_err(|e| HashError(e.to_string()))
    }

    fn verify(&self, password: &str, credential: &PasswordCredential) -> Result<bool, HashError> {
        let parsed_hash = PasswordHash::new(credential.expose())
            .map_err(|e| HashError(format!("invalid hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(HashError(format!("verify error: {e}"))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_password_matches() {
        let hasher = Argon2Hasher::new();
        let credential = hasher.hash("hunter2").unwrap();
        assert!(hasher.verify("hunter2", &credential).unwrap());
    }

    #[test]
    fn test_wrong_password_does_not_match() {
        let hasher = Argon2Hasher::new();
        let credential = hasher.hash("hunter2").unwrap();
        assert!(!hasher.verify("wrong", &credential).unwrap());
    }

    #[test]
    fn test_credential_is_not_the_plaintext() {
        let credential = Argon2Hasher::new().hash("hunter2").unwrap();
        assert!(credential.expose().starts_with("$argon2id$"));
        assert!(!credential.expose().contains("hunter2"));
    }

    #[test]
    fn test_malformed_credential_is_an_error() {
        let result = Argon2Hasher::new().verify("pw", &PasswordCredential::new("not-a-hash"));
        assert!(result.is_err());
    }
}
