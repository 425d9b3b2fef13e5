//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required signup field was empty or missing.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] reclaim_core::EmailError),

    /// Invalid credentials (wrong password or unknown email). One variant for
    /// both cases so callers cannot tell which check failed.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account already exists for this email.
    #[error("account already exists")]
    AccountExists,

    /// Account not found (profile lookup).
    #[error("account not found")]
    AccountNotFound,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
