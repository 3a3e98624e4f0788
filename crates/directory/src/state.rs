//! Application state shared across handlers.

use std::sync::Arc;

use user_directory_core::PasswordHasher;

use crate::config::DirectoryConfig;
use crate::services::DirectoryService;
use crate::services::auth::{Argon2Hasher, TokenIssuer};
use crate::store::UserStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; every clone sees the same user store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DirectoryConfig,
    directory: DirectoryService,
}

impl AppState {
    /// Create state with an empty store and the Argon2id hasher.
    #[must_use]
    pub fn new(config: DirectoryConfig) -> Self {
        Self::with_hasher(config, Arc::new(Argon2Hasher::new()))
    }

    /// Create state with an empty store and the given password hasher.
    #[must_use]
    pub fn with_hasher(config: DirectoryConfig, hasher: Arc<dyn PasswordHasher>) -> Self {
        let store = Arc::new(UserStore::with_case_insensitive_emails(
            config.case_insensitive_emails,
        ));
        let tokens = TokenIssuer::new(config.token_secret.clone());
        let directory = DirectoryService::new(store, hasher, tokens);

        Self {
            inner: Arc::new(AppStateInner { config, directory }),
        }
    }

    /// Get a reference to the directory configuration.
    #[must_use]
    pub fn config(&self) -> &DirectoryConfig {
        &self.inner.config
    }

    /// Get a reference to the directory service.
    #[must_use]
    pub fn directory(&self) -> &DirectoryService {
        &self.inner.directory
    }
}
