//! Directory service.
//!
//! Orchestrates login, registration, single-record fetch and listing on top
//! of the credential store, the password hasher and the token issuer. Every
//! record returned from here has been through the redaction transform.
//!
//! Bearer checks are not performed here; the HTTP layer runs the auth gate
//! before calling the protected operations.

mod error;

pub use error::DirectoryError;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use user_directory_core::{
    Email, PasswordCredential, PasswordHasher, Redacted, UserId, redact, redact_all,
};

use crate::models::{NewUser, User};
use crate::services::auth::{AuthError, Token, TokenIssuer};
use crate::store::UserStore;

/// Login request body.
#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration request body.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub token: Token,
    pub user: Redacted,
}

/// Result of listing users.
#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<Redacted>,
    pub count: usize,
}

/// Directory service.
///
/// Cheap to clone; the store and hasher are shared.
#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenIssuer,
    /// Verified against when the email is unknown, so both login failures cost one hash check.
    decoy: Option<Arc<PasswordCredential>>,
}

/// Input hashed once to build the decoy credential.
const DECOY_PASSWORD: &str = "user-directory-decoy-credential";

impl DirectoryService {
    /// Create a directory service over an owned store.
    ///
    /// Hashes a decoy credential once, up front.
    #[must_use]
    pub fn new(store: Arc<UserStore>, hasher: Arc<dyn PasswordHasher>, tokens: TokenIssuer) -> Self {
        let decoy = hasher
            .hash(DECOY_PASSWORD)
            .inspect_err(|e| tracing::warn!(error = %e, "decoy credential not available"))
            .ok()
            .map(Arc::new);

        Self {
            store,
            hasher,
            tokens,
            decoy,
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Authenticate with email and password and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::BadRequest` if either field is missing or empty.
    /// Returns `DirectoryError::Auth(AuthError::InvalidCredentials)` if the email
    /// is unknown or the password does not match.
    #[instrument(skip_all)]
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, DirectoryError> {
        let (Some(email), Some(password)) = (
            required_text(input.email.as_deref()),
            required_password(input.password.as_deref()),
        ) else {
            return Err(DirectoryError::BadRequest(
                "Email and password required".to_owned(),
            ));
        };

        let Some(user) = self.store.find_by_email(email).await else {
            if let Some(decoy) = &self.decoy {
                let _ = self.hasher.verify(password, decoy);
            }
            tracing::warn!("login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials.into());
        };

        let matches = self
            .hasher
            .verify(password, &user.password)
            .map_err(AuthError::from)?;
        if !matches {
            tracing::warn!(user_id = %user.id, "login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, "login succeeded");

        Ok(LoginOutcome {
            token,
            user: redact(&user.to_record(), false),
        })
    }

    /// Register a new user.
    ///
    /// Email and name are trimmed before validation and storage. The password
    /// is hashed as given.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::BadRequest` for a missing or empty field, or an
    /// email without `@` and a later `.`.
    /// Returns `DirectoryError::Conflict` if the email is already registered.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        input: RegisterInput,
        created_ip: Option<String>,
    ) -> Result<Redacted, DirectoryError> {
        self.create_user(&input, created_ip, None).await
    }

    /// Preload a user at startup, marked with an internal note.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register`].
    pub async fn seed(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Redacted, DirectoryError> {
        let input = RegisterInput {
            email: Some(email.to_owned()),
            password: Some(password.to_owned()),
            name: Some(name.to_owned()),
        };
        self.create_user(&input, None, Some("seed account".to_owned()))
            .await
    }

    /// Fetch a single user.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` if no user has this ID.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_by_id(
        &self,
        id: UserId,
        include_private: bool,
    ) -> Result<Redacted, DirectoryError> {
        let user = self
            .store
            .find_by_id(id)
            .await
            .ok_or(DirectoryError::NotFound(id))?;

        Ok(redact(&user.to_record(), include_private))
    }

    /// List every user in ascending ID order.
    #[instrument(skip(self))]
    pub async fn list(&self, include_private: bool) -> UserList {
        let records: Vec<_> = self
            .store
            .list_all()
            .await
            .iter()
            .map(User::to_record)
            .collect();
        let users = redact_all(&records, include_private);

        UserList {
            count: users.len(),
            users,
        }
    }

    async fn create_user(
        &self,
        input: &RegisterInput,
        created_ip: Option<String>,
        internal_notes: Option<String>,
    ) -> Result<Redacted, DirectoryError> {
        let email = required_text(input.email.as_deref())
            .ok_or_else(|| DirectoryError::BadRequest("Email is required".to_owned()))?;
        let password = required_password(input.password.as_deref())
            .ok_or_else(|| DirectoryError::BadRequest("Password is required".to_owned()))?;
        let name = required_text(input.name.as_deref())
            .ok_or_else(|| DirectoryError::BadRequest("Name is required".to_owned()))?;

        let email = Email::parse(email)
            .map_err(|_| DirectoryError::BadRequest("Invalid email format".to_owned()))?;

        let password = self.hasher.hash(password).map_err(AuthError::from)?;

        let user = self
            .store
            .create(NewUser {
                email,
                password,
                name: name.to_owned(),
                created_ip,
                internal_notes,
            })
            .await
            .inspect_err(|e| tracing::info!(error = %e, "registration rejected"))?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(redact(&user.to_record(), false))
    }
}

/// Trimmed value, or `None` when absent or blank.
fn required_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Untrimmed password, or `None` when absent or blank.
fn required_password(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
