//! Credential store for user records.
//!
//! The store is the single source of truth for identity uniqueness. All
//! mutations take the write lock, so the email check and the insert happen
//! as one step and the ID counter advances exactly once per created user.
//! Reads share the read lock and always see whole records.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use user_directory_core::UserId;

use super::StoreError;
use crate::models::{NewUser, User};

/// In-memory repository for users.
#[derive(Debug)]
pub struct UserStore {
    inner: RwLock<Inner>,
    case_insensitive_emails: bool,
}

#[derive(Debug)]
struct Inner {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create an empty store with case-sensitive email matching.
    #[must_use]
    pub fn new() -> Self {
        Self::with_case_insensitive_emails(false)
    }

    /// Create an empty store with the given email case policy.
    #[must_use]
    pub fn with_case_insensitive_emails(case_insensitive_emails: bool) -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: BTreeMap::new(),
                next_id: UserId::FIRST,
            }),
            case_insensitive_emails,
        }
    }

    /// Insert a new user and allocate its ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the email already exists.
    /// Returns `StoreError::IdsExhausted` if no further ID can be allocated.
    pub async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;

        let taken = inner
            .users
            .values()
            .any(|u| u.email.matches(new_user.email.as_str(), self.case_insensitive_emails));
        if taken {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        let id = inner.next_id;
        if id.as_i32() == i32::MAX {
            return Err(StoreError::IdsExhausted);
        }
        inner.next_id = id.next();

        let user = new_user.into_user(id);
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    /// Get a user by their email address.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|u| u.email.matches(email, self.case_insensitive_emails))
            .cloned()
    }

    /// Get a user by their ID.
    pub async fn find_by_id(&self, id: UserId) -> Option<User> {
        self.inner.read().await.users.get(&id).cloned()
    }

    /// All users in ascending ID order.
    pub async fn list_all(&self) -> Vec<User> {
        self.inner.read().await.users.values().cloned().collect()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// Whether the store holds no users.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.users.is_empty()
    }
}
