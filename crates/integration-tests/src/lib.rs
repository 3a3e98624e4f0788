//! End-to-end tests for the user directory.
//!
//! Each test starts the real router on an ephemeral local port and talks to
//! it over HTTP with `reqwest`, so the bearer gate, extractors and error
//! mapping run exactly as in production.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p user-directory-integration-tests
//! ```

use std::net::SocketAddr;

use reqwest::{Client, Response};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use user_directory::AppState;
use user_directory::config::DirectoryConfig;

/// Email of the user every test server is seeded with.
pub const SEED_EMAIL: &str = "test@example.com";
/// Password of the seed user.
pub const SEED_PASSWORD: &str = "password123";
/// Display name of the seed user.
pub const SEED_NAME: &str = "Test User";

const TEST_TOKEN_SECRET: &str = "kR8#vQ2!nZ5@wL9$hT3&mB6*pX1^cF4%";

/// A directory server running on a local ephemeral port.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub state: AppState,
}

/// Default configuration used by [`TestServer::start`].
#[must_use]
pub fn test_config() -> DirectoryConfig {
    DirectoryConfig::with_token_secret(SecretString::from(TEST_TOKEN_SECRET))
}

impl TestServer {
    /// Start a server with default configuration and the seed user.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the seed user cannot be created.
    pub async fn start() -> Self {
        Self::start_with(test_config()).await
    }

    /// Start a server with the given configuration and the seed user.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind or the seed user cannot be created.
    #[allow(clippy::expect_used)]
    pub async fn start_with(config: DirectoryConfig) -> Self {
        let state = AppState::new(config);
        state
            .directory()
            .seed(SEED_EMAIL, SEED_PASSWORD, SEED_NAME)
            .await
            .expect("Failed to seed test user");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = user_directory::app(state.clone());
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
            state,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /auth/login` with the given credentials.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    #[allow(clippy::expect_used)]
    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Log in as the seed user and return the issued token.
    ///
    /// # Panics
    ///
    /// Panics if login does not succeed.
    #[allow(clippy::expect_used)]
    pub async fn seed_token(&self) -> String {
        let body: Value = self
            .login(SEED_EMAIL, SEED_PASSWORD)
            .await
            .json()
            .await
            .expect("Login response is not JSON");
        body["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    /// `POST /users` with a JSON body and optional bearer token.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    #[allow(clippy::expect_used)]
    pub async fn register(&self, body: &Value, token: Option<&str>) -> Response {
        let mut request = self.client.post(self.url("/users")).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to send register request")
    }

    /// `GET` a path with a raw `Authorization` header value.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    #[allow(clippy::expect_used)]
    pub async fn get_with_authorization(&self, path: &str, authorization: Option<&str>) -> Response {
        let mut request = self.client.get(self.url(path));
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        request.send().await.expect("Failed to send request")
    }
}
