//! Database operations for the registry's `SQLite` store.
//!
//! ## Tables
//!
//! - `account` - Registered reporters with their three activity counters
//! - `item` - Lost/found item reports, owned by an account
//!
//! All queries are runtime-checked (`sqlx::query`/`query_as`), so the crate
//! builds without a live database. Migrations are embedded via
//! [`sqlx::migrate!`] and run at startup.
//!
//! Timestamps are bound from Rust as `DateTime<Utc>` and stored as RFC 3339
//! text, which keeps lexical ordering equal to chronological ordering.

pub mod accounts;
pub mod items;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use accounts::AccountRepository;
pub use items::{ItemRepository, NewItem};

/// Embedded migrations from `crates/server/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// WAL journaling plus a busy timeout lets concurrent request handlers share
/// the database without spurious `SQLITE_BUSY` failures.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be
/// opened.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
