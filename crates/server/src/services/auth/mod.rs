//! Account service: signup, login, and profile lookup.
//!
//! Passwords are hashed with Argon2id in PHC string format. The cost
//! parameters come from [`crate::config::Argon2Config`] via the shared
//! hasher in application state.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use reclaim_core::{AccountId, Email};

use crate::db::RepositoryError;
use crate::db::accounts::AccountRepository;
use crate::models::Account;

/// A valid Argon2id PHC string for a throwaway password. Verified when a
/// login names an unknown email so that both failure paths do comparable
/// work and stay indistinguishable to the caller.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Account service.
///
/// Handles registration, login, and the sanitized profile projection.
pub struct AuthService<'a> {
    accounts: AccountRepository<'a>,
    hasher: &'a Argon2<'static>,
}

impl<'a> AuthService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, hasher: &'a Argon2<'static>) -> Self {
        Self {
            accounts: AccountRepository::new(pool),
            hasher,
        }
    }

    /// Register a new account with all counters at zero.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if any field is empty.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::AccountExists` if the email is already registered.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        mobile: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        validate_signup(name, email, mobile, password)?;

        let email = Email::parse(email)?;
        let password_hash = hash_password(self.hasher, password)?;

        let account = self
            .accounts
            .create(name.trim(), &email, mobile.trim(), &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AccountExists,
                other => AuthError::Repository(other),
            })?;

        Ok(account)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` whether the email is unknown
    /// or the password is wrong; the two cases are indistinguishable.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        // A malformed email can't belong to any account; fall through to the
        // uniform failure path rather than reporting a validation error.
        let Ok(email) = Email::parse(email) else {
            verify_password(self.hasher, password, DUMMY_HASH).ok();
            return Err(AuthError::InvalidCredentials);
        };

        let Some((account, password_hash)) = self.accounts.get_with_password_hash(&email).await?
        else {
            verify_password(self.hasher, password, DUMMY_HASH).ok();
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(self.hasher, password, &password_hash)?;

        Ok(account)
    }

    /// Get the sanitized profile for an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AccountNotFound` if the ID does not resolve.
    pub async fn get_profile(&self, id: AccountId) -> Result<Account, AuthError> {
        self.accounts
            .get_by_id(id)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }
}

/// Check that every signup field carries a value.
fn validate_signup(
    name: &str,
    email: &str,
    mobile: &str,
    password: &str,
) -> Result<(), AuthError> {
    if name.trim().is_empty() {
        return Err(AuthError::MissingField("name"));
    }
    if email.trim().is_empty() {
        return Err(AuthError::MissingField("email"));
    }
    if mobile.trim().is_empty() {
        return Err(AuthError::MissingField("mobile"));
    }
    if password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }
    Ok(())
}

/// Hash a password using the configured Argon2id parameters.
fn hash_password(hasher: &Argon2<'static>, password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC hash.
fn verify_password(
    hasher: &Argon2<'static>,
    password: &str,
    hash: &str,
) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    hasher
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_hasher() -> Argon2<'static> {
        // Low-cost parameters keep the test suite fast.
        let params = argon2::Params::new(1024, 1, 1, None).unwrap();
        Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
    }

    #[test]
    fn test_validate_signup_rejects_empty_fields() {
        assert!(matches!(
            validate_signup("", "a@x.com", "1", "pw"),
            Err(AuthError::MissingField("name"))
        ));
        assert!(matches!(
            validate_signup("Ann", "", "1", "pw"),
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            validate_signup("Ann", "a@x.com", "  ", "pw"),
            Err(AuthError::MissingField("mobile"))
        ));
        assert!(matches!(
            validate_signup("Ann", "a@x.com", "1", ""),
            Err(AuthError::MissingField("password"))
        ));
        assert!(validate_signup("Ann", "a@x.com", "1", "pw").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hasher = test_hasher();
        let hash = hash_password(&hasher, "secret1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hasher, "secret1", &hash).is_ok());
        assert!(matches!(
            verify_password(&hasher, "wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = test_hasher();
        let a = hash_password(&hasher, "secret1").unwrap();
        let b = hash_password(&hasher, "secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_dummy_hash_parses() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_signup_then_login(pool: SqlitePool) {
        let hasher = test_hasher();
        let auth = AuthService::new(&pool, &hasher);

        let created = auth
            .signup("Ann", "a@x.com", "1234567890", "secret1")
            .await
            .unwrap();
        assert_eq!(created.lost_count, 0);

        let logged_in = auth.login("a@x.com", "secret1").await.unwrap();
        assert_eq!(logged_in.id, created.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_signup_conflicts(pool: SqlitePool) {
        let hasher = test_hasher();
        let auth = AuthService::new(&pool, &hasher);

        auth.signup("Ann", "a@x.com", "111", "secret1").await.unwrap();
        let err = auth
            .signup("Ann again", "a@x.com", "222", "secret2")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountExists));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_login_failures_are_uniform(pool: SqlitePool) {
        let hasher = test_hasher();
        let auth = AuthService::new(&pool, &hasher);

        auth.signup("Ann", "a@x.com", "111", "secret1").await.unwrap();

        let wrong_password = auth.login("a@x.com", "nope").await.unwrap_err();
        let unknown_email = auth.login("ghost@x.com", "nope").await.unwrap_err();
        let malformed_email = auth.login("not-an-email", "nope").await.unwrap_err();

        // Same variant, same message; no enumeration signal.
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(unknown_email.to_string(), malformed_email.to_string());
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_get_profile_missing(pool: SqlitePool) {
        let hasher = test_hasher();
        let auth = AuthService::new(&pool, &hasher);

        let err = auth.get_profile(AccountId::new(404)).await.unwrap_err();
        assert!(matches!(err, AuthError::AccountNotFound));
    }
}
