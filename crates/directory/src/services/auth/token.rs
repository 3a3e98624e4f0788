//! Bearer token issuance and validation.
//!
//! Tokens are stateless: nothing is stored server-side, they carry no expiry
//! and there is no revocation. A token is
//! `base64url("{id}:{email}") + "." + hex(HMAC-SHA256(secret, "{id}:{email}"))`,
//! which makes it deterministic for a given secret and distinct per user.
//!
//! Validation only checks the shape of the `Authorization` header. It does
//! not resolve the token back to a user, so any well-formed bearer value is
//! accepted by the gate.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;
use thiserror::Error;

use super::AuthError;
use crate::models::User;

type HmacSha256 = Hmac<Sha256>;

/// Prefix of an accepted `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// A bearer token issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The token part of an accepted `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerToken<'a>(&'a str);

impl<'a> BearerToken<'a> {
    /// Returns the presented token.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.0
    }
}

/// Why an `Authorization` header was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateRejection {
    /// No `Authorization` header was sent.
    #[error("missing authorization header")]
    MissingHeader,
    /// The header does not use the `Bearer` scheme.
    #[error("unsupported authorization scheme")]
    UnsupportedScheme,
    /// The header is `Bearer` followed by nothing.
    #[error("empty bearer token")]
    EmptyToken,
}

/// Issues bearer tokens and checks presented ones.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: SecretString,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenIssuer {
    /// Create an issuer signing with `secret`.
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Issue a token bound to the user's ID and email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if the MAC cannot be keyed.
    pub fn issue(&self, user: &User) -> Result<Token, AuthError> {
        let payload = format!("{}:{}", user.id, user.email);

        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::TokenSigning(e.to_string()))?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(Token(format!(
            "{}.{signature}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )))
    }

    /// Check the shape of an `Authorization` header value.
    ///
    /// Accepts `"Bearer " + token` where the token is non-empty after
    /// trimming. The scheme prefix is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns the matching `GateRejection` for a missing header, a
    /// non-`Bearer` scheme or an empty token.
    pub fn validate(header: Option<&str>) -> Result<BearerToken<'_>, GateRejection> {
        let header = header.ok_or(GateRejection::MissingHeader)?;

        let token = match header.strip_prefix(BEARER_PREFIX) {
            Some(token) => token.trim(),
            // "Bearer" with nothing after it, as some clients send
            None if header.trim_end() == BEARER_PREFIX.trim_end() => "",
            None => return Err(GateRejection::UnsupportedScheme),
        };

        if token.is_empty() {
            return Err(GateRejection::EmptyToken);
        }

        Ok(BearerToken(token))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use user_directory_core::{Email, PasswordCredential, UserId};

    use super::*;
    use crate::models::NewUser;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"))
    }

    fn user(id: i32, email: &str) -> User {
        NewUser {
            email: Email::parse(email).unwrap(),
            password: PasswordCredential::new("hash"),
            name: "Test".to_owned(),
            created_ip: None,
            internal_notes: None,
        }
        .into_user(UserId::new(id))
    }

    #[test]
    fn test_issue_is_deterministic() {
        let user = user(1, "test@example.com");
        assert_eq!(
            issuer().issue(&user).unwrap(),
            issuer().issue(&user).unwrap()
        );
    }

    #[test]
    fn test_issue_binds_id_and_email() {
        let token = issuer().issue(&user(7, "a@b.com")).unwrap();
        let (payload, signature) = token.as_str().split_once('.').unwrap();
        let decoded = URL_SAFE_NO_PAD.decode(payload).unwrap();
        assert_eq!(decoded, b"7:a@b.com");
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn test_distinct_users_get_distinct_tokens() {
        let a = issuer().issue(&user(1, "a@b.com")).unwrap();
        let b = issuer().issue(&user(2, "a@b.com")).unwrap();
        let c = issuer().issue(&user(1, "c@b.com")).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_issued_token_passes_validation() {
        let token = issuer().issue(&user(1, "a@b.com")).unwrap();
        let header = format!("Bearer {}", token.as_str());
        let accepted = TokenIssuer::validate(Some(&header)).unwrap();
        assert_eq!(accepted.as_str(), token.as_str());
    }

    #[test]
    fn test_validate_accepts_any_well_formed_bearer() {
        let accepted = TokenIssuer::validate(Some("Bearer valid_token_here")).unwrap();
        assert_eq!(accepted.as_str(), "valid_token_here");
    }

    #[test]
    fn test_validate_rejects_missing_header() {
        assert_eq!(
            TokenIssuer::validate(None),
            Err(GateRejection::MissingHeader)
        );
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        for header in ["InvalidFormat token", "Basic dXNlcjpwYXNz", "bearer abc", "Bearerabc", ""] {
            assert_eq!(
                TokenIssuer::validate(Some(header)),
                Err(GateRejection::UnsupportedScheme),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        for header in ["Bearer ", "Bearer", "Bearer    "] {
            assert_eq!(
                TokenIssuer::validate(Some(header)),
                Err(GateRejection::EmptyToken),
                "header {header:?}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug_output = format!("{:?}", issuer());
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("aB3$"));
    }
}
