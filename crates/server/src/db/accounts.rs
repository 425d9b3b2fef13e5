//! Account repository for database operations.
//!
//! The counter columns (`lost_count`, `found_count`, `returned_count`) are
//! never written from values read into memory; they only move through the
//! atomic `SET x = x + 1` updates in [`crate::db::items`].

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use reclaim_core::{AccountId, Email};

use super::RepositoryError;
use crate::models::Account;

/// Columns of the sanitized account projection. The password hash is only
/// selected by [`AccountRepository::get_with_password_hash`].
const ACCOUNT_COLUMNS: &str = "id, name, email, mobile, lost_count, found_count, returned_count, \
                               created_at, updated_at";

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    email: String,
    mobile: String,
    lost_count: i64,
    found_count: i64,
    returned_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Result<Account, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Account {
            id: AccountId::new(self.id),
            name: self.name,
            email,
            mobile: self.mobile,
            lost_count: self.lost_count,
            found_count: self.found_count,
            returned_count: self.returned_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new account with all counters at zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        mobile: &str,
        password_hash: &str,
    ) -> Result<Account, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "INSERT INTO account (name, email, mobile, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(mobile)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_account()
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    /// Get an account and its password hash by email.
    ///
    /// Returns `None` if no account uses this email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Account, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct AuthRow {
            #[sqlx(flatten)]
            account: AccountRow,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, AuthRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS}, password_hash FROM account WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some((r.account.into_account()?, r.password_hash))),
            None => Ok(None),
        }
    }
}
