//! Item service: report creation, listing, and the return workflow.
//!
//! The return workflow is the single state transition in the system:
//! Open → Returned, gated on ownership, applied as a compare-and-set so
//! concurrent duplicates cannot double-count.

use sqlx::SqlitePool;
use thiserror::Error;

use reclaim_core::{AccountId, ItemId, ItemType, ItemTypeError};

use crate::db::RepositoryError;
use crate::db::items::{ItemRepository, NewItem};
use crate::models::Item;

/// Errors that can occur during item operations.
#[derive(Debug, Error)]
pub enum ItemError {
    /// A required field was empty or missing.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The type field was neither "lost" nor "found".
    #[error(transparent)]
    InvalidType(#[from] ItemTypeError),

    /// No caller identity was supplied.
    #[error("login required")]
    Unauthenticated,

    /// The supplied caller identity does not match any account.
    #[error("unknown user")]
    UnknownOwner,

    /// Item not found.
    #[error("item not found")]
    NotFound,

    /// The caller is not the item's reporter.
    #[error("not authorized")]
    NotOwner,

    /// The item has already been marked returned.
    #[error("already returned")]
    AlreadyReturned,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Raw fields of an item report, as read from the request.
///
/// The caller's identity arrives in-band as `owner_id`; the server trusts it
/// verbatim (there is no session layer in front of this API).
#[derive(Debug, Default)]
pub struct CreateItem {
    pub item_type: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub mobile: Option<String>,
    pub image: Option<String>,
    pub owner_id: Option<AccountId>,
}

/// Item service.
pub struct ItemService<'a> {
    items: ItemRepository<'a>,
}

impl<'a> ItemService<'a> {
    /// Create a new item service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            items: ItemRepository::new(pool),
        }
    }

    /// Create an item report and bump the owner's matching counter.
    ///
    /// Identity and field checks run before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::Unauthenticated` if no owner ID was supplied.
    /// Returns `ItemError::MissingField`/`InvalidType` on validation failure.
    /// Returns `ItemError::UnknownOwner` if the owner ID matches no account.
    pub async fn create(&self, req: CreateItem) -> Result<Item, ItemError> {
        let owner = req.owner_id.ok_or(ItemError::Unauthenticated)?;

        let item_type = ItemType::parse(required(req.item_type.as_deref(), "type")?)?;
        let new = NewItem {
            item_type,
            product_name: required(req.product_name.as_deref(), "productName")?.to_owned(),
            description: req.description.unwrap_or_default(),
            date: required(req.date.as_deref(), "date")?.to_owned(),
            location: required(req.location.as_deref(), "location")?.to_owned(),
            mobile: required(req.mobile.as_deref(), "mobile")?.to_owned(),
            image: req.image,
        };

        self.items
            .create_for_owner(owner, &new)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ItemError::UnknownOwner,
                other => ItemError::Repository(other),
            })
    }

    /// List items of one type, newest first. Read-only, no authentication.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::Repository` if the query fails.
    pub async fn list(&self, item_type: ItemType) -> Result<Vec<Item>, ItemError> {
        Ok(self.items.list_by_type(item_type).await?)
    }

    /// Mark an item as returned on behalf of `caller`.
    ///
    /// Check order: identity, existence, ownership, state. The state write is
    /// a compare-and-set; when a concurrent call wins the race this call
    /// reports `AlreadyReturned` instead of double-incrementing.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::Unauthenticated` if `caller` is absent.
    /// Returns `ItemError::NotFound` if the item does not exist.
    /// Returns `ItemError::NotOwner` if `caller` is not the item's reporter.
    /// Returns `ItemError::AlreadyReturned` if the item was already returned.
    pub async fn mark_returned(
        &self,
        item_id: ItemId,
        caller: Option<AccountId>,
    ) -> Result<(), ItemError> {
        let caller = caller.ok_or(ItemError::Unauthenticated)?;

        let item = self
            .items
            .get_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound)?;

        if item.owner_id != caller {
            return Err(ItemError::NotOwner);
        }

        if item.returned {
            return Err(ItemError::AlreadyReturned);
        }

        if self.items.mark_returned(item_id, item.owner_id).await? {
            Ok(())
        } else {
            Err(ItemError::AlreadyReturned)
        }
    }
}

/// Require a non-empty field value.
fn required<'v>(value: Option<&'v str>, field: &'static str) -> Result<&'v str, ItemError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ItemError::MissingField(field)),
    }
}
