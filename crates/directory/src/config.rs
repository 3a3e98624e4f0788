//! Directory configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DIRECTORY_TOKEN_SECRET` - Bearer token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `DIRECTORY_HOST` - Bind address (default: 127.0.0.1)
//! - `DIRECTORY_PORT` - Listen port (default: 5000)
//! - `DIRECTORY_CASE_INSENSITIVE_EMAILS` - Fold ASCII case when matching emails (default: false)
//! - `DIRECTORY_REQUIRE_AUTH_FOR_REGISTRATION` - Put `POST /users` behind the bearer gate (default: false)
//! - `DIRECTORY_SEED_EMAIL`, `DIRECTORY_SEED_PASSWORD`, `DIRECTORY_SEED_NAME` - Preload one
//!   user at startup (all three or none)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;

/// Shortest accepted token secret, in bytes.
const MIN_TOKEN_SECRET_LENGTH: usize = 32;
/// Lowest accepted Shannon entropy of the token secret, in bits per character.
const MIN_TOKEN_SECRET_ENTROPY: f64 = 3.3;

/// Substrings that mark a token secret as copied from a template.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "changeme",
    "placeholder",
    "example",
    "secret",
    "password",
    "replace",
    "your-",
    "put-your",
    "insert",
    "xxx",
    "todo",
];

const SEED_KEYS: [&str; 3] = [
    "DIRECTORY_SEED_EMAIL",
    "DIRECTORY_SEED_PASSWORD",
    "DIRECTORY_SEED_NAME",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Directory application configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bearer token signing secret
    pub token_secret: SecretString,
    /// Whether email uniqueness and lookup ignore ASCII case
    pub case_insensitive_emails: bool,
    /// Whether registration requires a bearer token
    pub require_auth_for_registration: bool,
    /// User preloaded at startup
    pub seed: Option<SeedUser>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// A user to preload at startup.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct SeedUser {
    pub email: String,
    pub password: SecretString,
    pub name: String,
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

impl DirectoryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the token secret fails validation (length, placeholder detection,
    /// entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host: IpAddr = parsed_env("DIRECTORY_HOST")?.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port: u16 = parsed_env("DIRECTORY_PORT")?.unwrap_or(DEFAULT_PORT);

        let token_secret = SecretString::from(required_env("DIRECTORY_TOKEN_SECRET")?);
        check_token_secret(token_secret.expose_secret()).map_err(|reason| {
            ConfigError::InsecureSecret("DIRECTORY_TOKEN_SECRET".to_string(), reason)
        })?;

        let case_insensitive_emails = flag_env("DIRECTORY_CASE_INSENSITIVE_EMAILS")?;
        let require_auth_for_registration = flag_env("DIRECTORY_REQUIRE_AUTH_FOR_REGISTRATION")?;

        let seed = SeedUser::from_values(SEED_KEYS.map(optional_env))?;

        Ok(Self {
            host,
            port,
            token_secret,
            case_insensitive_emails,
            require_auth_for_registration,
            seed,
            sentry_dsn: optional_env("SENTRY_DSN"),
            sentry_environment: optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration with defaults and the given token secret.
    ///
    /// The secret is not validated; use [`Self::from_env`] for deployments.
    #[must_use]
    pub fn with_token_secret(token_secret: SecretString) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            token_secret,
            case_insensitive_emails: false,
            require_auth_for_registration: false,
            seed: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SeedUser {
    /// Build from the optional seed variables, which must be all set or all unset.
    fn from_values(values: [Option<String>; 3]) -> Result<Option<Self>, ConfigError> {
        match values {
            [Some(email), Some(password), Some(name)] => Ok(Some(Self {
                email,
                password: SecretString::from(password),
                name,
            })),
            [None, None, None] => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "DIRECTORY_SEED_*".to_string(),
                format!("set all of {} or none", SEED_KEYS.join(", ")),
            )),
        }
    }
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional variable with `FromStr`.
fn parsed_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

/// Boolean variable, `false` when unset.
fn flag_env(key: &str) -> Result<bool, ConfigError> {
    optional_env(key).map_or(Ok(false), |value| parse_bool(key, &value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

/// Reject token secrets that are short, templated or low in entropy.
fn check_token_secret(secret: &str) -> Result<(), String> {
    if secret.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(format!(
            "must be at least {MIN_TOKEN_SECRET_LENGTH} characters (got {})",
            secret.len()
        ));
    }

    let lower = secret.to_lowercase();
    if let Some(marker) = PLACEHOLDER_MARKERS.iter().find(|m| lower.contains(*m)) {
        return Err(format!("looks like a template value (contains '{marker}')"));
    }

    let entropy = entropy_bits_per_char(secret);
    if entropy < MIN_TOKEN_SECRET_ENTROPY {
        return Err(format!(
            "entropy {entropy:.2} bits/char is below {MIN_TOKEN_SECRET_ENTROPY:.1}; generate it randomly"
        ));
    }

    Ok(())
}

/// Shannon entropy over the bytes of `s`.
#[allow(clippy::cast_precision_loss)]
fn entropy_bits_per_char(s: &str) -> f64 {
    let mut counts = [0usize; 256];
    for byte in s.bytes() {
        if let Some(count) = counts.get_mut(usize::from(byte)) {
            *count += 1;
        }
    }

    let total = s.len() as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}
