//! Account domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use reclaim_core::{AccountId, Email};

/// A registered reporter (domain type).
///
/// The password hash is deliberately not part of this type; it only travels
/// alongside an `Account` during login verification.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Email address (unique, case-sensitive as stored).
    pub email: Email,
    /// Contact mobile number.
    pub mobile: String,
    /// Number of items this account reported as lost.
    pub lost_count: i64,
    /// Number of items this account reported as found.
    pub found_count: i64,
    /// Number of this account's items marked returned.
    pub returned_count: i64,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Sanitized account projection returned by the API.
///
/// Field names match the public JSON contract (camelCase). This is the only
/// shape in which account data ever leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: AccountId,
    pub name: String,
    pub email: Email,
    pub mobile: String,
    pub lost_count: i64,
    pub found_count: i64,
    pub returned_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            mobile: account.mobile,
            lost_count: account.lost_count,
            found_count: account.found_count,
            returned_count: account.returned_count,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}
