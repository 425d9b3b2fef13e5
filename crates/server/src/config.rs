//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `RECLAIM_DATABASE_URL` - `SQLite` connection string
//!   (falls back to `DATABASE_URL`, default: `sqlite://reclaim.db`)
//! - `RECLAIM_HOST` - Bind address (default: 127.0.0.1)
//! - `RECLAIM_PORT` - Listen port (default: 3000)
//! - `RECLAIM_UPLOAD_DIR` - Directory for uploaded images (default: `uploads`)
//! - `RECLAIM_CORS_ORIGIN` - Exact allowed CORS origin (default: any origin)
//! - `RECLAIM_ARGON2_MEMORY_KIB` - Argon2id memory cost in KiB (default: 19456)
//! - `RECLAIM_ARGON2_ITERATIONS` - Argon2id time cost (default: 2)
//! - `RECLAIM_ARGON2_PARALLELISM` - Argon2id lanes (default: 1)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Reclaim application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory where uploaded item images are stored
    pub upload_dir: PathBuf,
    /// Exact allowed CORS origin; `None` allows any origin
    pub cors_origin: Option<HeaderValue>,
    /// Password hashing cost parameters
    pub argon2: Argon2Config,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Argon2id cost parameters.
///
/// Defaults follow the OWASP minimum recommendation (19 MiB, t=2, p=1).
#[derive(Debug, Clone, Copy)]
pub struct Argon2Config {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Time cost (iterations).
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("RECLAIM_DATABASE_URL", "sqlite://reclaim.db");
        let host = get_env_or_default("RECLAIM_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("RECLAIM_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("RECLAIM_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("RECLAIM_PORT".to_string(), e.to_string()))?;
        let upload_dir = PathBuf::from(get_env_or_default("RECLAIM_UPLOAD_DIR", "uploads"));
        let cors_origin = get_optional_env("RECLAIM_CORS_ORIGIN")
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| {
                    ConfigError::InvalidEnvVar("RECLAIM_CORS_ORIGIN".to_string(), e.to_string())
                })
            })
            .transpose()?;
        let argon2 = Argon2Config::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            upload_dir,
            cors_origin,
            argon2,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Argon2Config {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            memory_kib: get_parsed_or(
                "RECLAIM_ARGON2_MEMORY_KIB",
                defaults.memory_kib,
            )?,
            iterations: get_parsed_or("RECLAIM_ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: get_parsed_or("RECLAIM_ARGON2_PARALLELISM", defaults.parallelism)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str, default: &str) -> SecretString {
    if let Ok(value) = std::env::var(primary_key) {
        return SecretString::from(value);
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return SecretString::from(value);
    }
    SecretString::from(default.to_owned())
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, using the default when unset.
fn get_parsed_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
