//! Item report type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a valid [`ItemType`].
#[derive(thiserror::Error, Debug, Clone)]
#[error("item type must be 'lost' or 'found', got '{0}'")]
pub struct ItemTypeError(pub String);

/// Whether an item was reported as lost or found.
///
/// The type is fixed when the item is created and never changes afterwards.
///
/// ## Examples
///
/// ```
/// use reclaim_core::ItemType;
///
/// assert_eq!(ItemType::parse("lost").unwrap(), ItemType::Lost);
/// assert_eq!(ItemType::Found.as_str(), "found");
/// assert!(ItemType::parse("stolen").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// The reporter lost this item and is looking for it.
    Lost,
    /// The reporter found this item and is looking for its owner.
    Found,
}

impl ItemType {
    /// Parse an `ItemType` from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`ItemTypeError`] if the input is neither `"lost"` nor
    /// `"found"`. Matching is exact; no case folding is applied.
    pub fn parse(s: &str) -> Result<Self, ItemTypeError> {
        match s {
            "lost" => Ok(Self::Lost),
            "found" => Ok(Self::Found),
            other => Err(ItemTypeError(other.to_owned())),
        }
    }

    /// The wire/database representation of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Found => "found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemType {
    type Err = ItemTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with sqlite feature)
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for ItemType {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ItemType {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self::parse(&s)?)
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ItemType {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.as_str(), buf)
    }
}
