//! Item domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use reclaim_core::{AccountId, ItemId, ItemType};

/// A reported lost or found item (domain type).
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Whether the item was reported lost or found. Fixed at creation.
    pub item_type: ItemType,
    /// What the item is.
    pub product_name: String,
    /// Free-text description.
    pub description: String,
    /// Date the item was lost/found, as supplied by the reporter.
    pub date: String,
    /// Where the item was lost/found.
    pub location: String,
    /// Contact mobile number for this report.
    pub mobile: String,
    /// Opaque reference to an uploaded image (e.g. `/uploads/<name>`).
    pub image: Option<String>,
    /// Whether the item has been returned to its owner. One-way false→true.
    pub returned: bool,
    /// Account that filed this report. Fixed at creation.
    pub owner_id: AccountId,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// When the report was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Item as serialized on the wire (camelCase, `userId` for the owner).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub product_name: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub mobile: String,
    pub image: Option<String>,
    pub returned: bool,
    pub user_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            item_type: item.item_type,
            product_name: item.product_name,
            description: item.description,
            date: item.date,
            location: item.location,
            mobile: item.mobile,
            image: item.image,
            returned: item.returned,
            user_id: item.owner_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
