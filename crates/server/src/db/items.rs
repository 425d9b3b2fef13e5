//! Item repository for database operations.
//!
//! Item writes and the owner's counter updates are paired inside a single
//! transaction, so an item record can never exist without its counter bump.
//! The Open→Returned transition is a conditional update, not a read-then-write.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use reclaim_core::{AccountId, ItemId, ItemType};

use super::RepositoryError;
use crate::models::Item;

const ITEM_COLUMNS: &str = "id, item_type, product_name, description, date, location, mobile, \
                            image, returned, owner_id, created_at, updated_at";

/// Fields of a new item report, validated by the service layer.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub item_type: ItemType,
    pub product_name: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub mobile: String,
    pub image: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    item_type: String,
    product_name: String,
    description: String,
    date: String,
    location: String,
    mobile: String,
    image: Option<String>,
    returned: bool,
    owner_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ItemRow {
    fn into_item(self) -> Result<Item, RepositoryError> {
        let item_type = ItemType::parse(&self.item_type).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid item type in database: {e}"))
        })?;

        Ok(Item {
            id: ItemId::new(self.id),
            item_type,
            product_name: self.product_name,
            description: self.description,
            date: self.date,
            location: self.location,
            mobile: self.mobile,
            image: self.image,
            returned: self.returned,
            owner_id: AccountId::new(self.owner_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for item database operations.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an item and bump the owner's matching counter.
    ///
    /// The INSERT and the `lost_count`/`found_count` increment run in one
    /// transaction. If the owner does not exist, nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the owner account does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_for_owner(
        &self,
        owner: AccountId,
        new: &NewItem,
    ) -> Result<Item, RepositoryError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "INSERT INTO item (item_type, product_name, description, date, location, mobile, \
                               image, returned, owner_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?) \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(new.item_type)
        .bind(&new.product_name)
        .bind(&new.description)
        .bind(&new.date)
        .bind(&new.location)
        .bind(&new.mobile)
        .bind(&new.image)
        .bind(owner)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let counter_update = match new.item_type {
            ItemType::Lost => {
                "UPDATE account SET lost_count = lost_count + 1, updated_at = ? WHERE id = ?"
            }
            ItemType::Found => {
                "UPDATE account SET found_count = found_count + 1, updated_at = ? WHERE id = ?"
            }
        };

        let result = sqlx::query(counter_update)
            .bind(now)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Unknown owner; dropping the transaction rolls the INSERT back.
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        row.into_item()
    }

    /// Get an item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM item WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ItemRow::into_item).transpose()
    }

    /// List items of one type, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_type(&self, item_type: ItemType) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM item WHERE item_type = ? \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(item_type)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    /// Flip an item's `returned` flag and bump the owner's `returned_count`.
    ///
    /// The flag write is conditional on the stored value still being false;
    /// of two concurrent callers exactly one sees `true` here, and only that
    /// caller's transaction increments the counter.
    ///
    /// # Returns
    ///
    /// `true` if this call performed the transition, `false` if the item was
    /// already returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn mark_returned(
        &self,
        id: ItemId,
        owner: AccountId,
    ) -> Result<bool, RepositoryError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE item SET returned = 1, updated_at = ? WHERE id = ? AND returned = 0",
        )
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Lost the race (or re-submission): no transition, no counter bump.
            return Ok(false);
        }

        sqlx::query("UPDATE account SET returned_count = returned_count + 1, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::AccountRepository;
    use reclaim_core::Email;

    async fn seed_account(pool: &SqlitePool, email: &str) -> AccountId {
        AccountRepository::new(pool)
            .create("Test", &Email::parse(email).unwrap(), "1234567890", "hash")
            .await
            .unwrap()
            .id
    }

    fn wallet(item_type: ItemType) -> NewItem {
        NewItem {
            item_type,
            product_name: "Wallet".to_owned(),
            description: "Brown leather".to_owned(),
            date: "2024-01-01".to_owned(),
            location: "Park".to_owned(),
            mobile: "1234567890".to_owned(),
            image: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_bumps_matching_counter_only(pool: SqlitePool) {
        let owner = seed_account(&pool, "a@x.com").await;
        let items = ItemRepository::new(&pool);
        let accounts = AccountRepository::new(&pool);

        items.create_for_owner(owner, &wallet(ItemType::Lost)).await.unwrap();
        let account = accounts.get_by_id(owner).await.unwrap().unwrap();
        assert_eq!(account.lost_count, 1);
        assert_eq!(account.found_count, 0);
        assert_eq!(account.returned_count, 0);

        items.create_for_owner(owner, &wallet(ItemType::Found)).await.unwrap();
        let account = accounts.get_by_id(owner).await.unwrap().unwrap();
        assert_eq!(account.lost_count, 1);
        assert_eq!(account.found_count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_for_unknown_owner_writes_nothing(pool: SqlitePool) {
        let items = ItemRepository::new(&pool);

        let err = items
            .create_for_owner(AccountId::new(999), &wallet(ItemType::Lost))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        // The INSERT was rolled back with the failed counter update.
        assert!(items.list_by_type(ItemType::Lost).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_filters_type_and_orders_newest_first(pool: SqlitePool) {
        let owner = seed_account(&pool, "a@x.com").await;
        let items = ItemRepository::new(&pool);

        let first = items.create_for_owner(owner, &wallet(ItemType::Lost)).await.unwrap();
        let second = items.create_for_owner(owner, &wallet(ItemType::Lost)).await.unwrap();
        items.create_for_owner(owner, &wallet(ItemType::Found)).await.unwrap();

        let lost = items.list_by_type(ItemType::Lost).await.unwrap();
        assert_eq!(lost.len(), 2);
        assert_eq!(lost[0].id, second.id);
        assert_eq!(lost[1].id, first.id);
        assert!(lost.iter().all(|i| i.item_type == ItemType::Lost));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_mark_returned_is_one_way(pool: SqlitePool) {
        let owner = seed_account(&pool, "a@x.com").await;
        let items = ItemRepository::new(&pool);
        let accounts = AccountRepository::new(&pool);

        let item = items.create_for_owner(owner, &wallet(ItemType::Lost)).await.unwrap();

        assert!(items.mark_returned(item.id, owner).await.unwrap());
        assert!(!items.mark_returned(item.id, owner).await.unwrap());

        let account = accounts.get_by_id(owner).await.unwrap().unwrap();
        assert_eq!(account.returned_count, 1);

        let stored = items.get_by_id(item.id).await.unwrap().unwrap();
        assert!(stored.returned);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_mark_returned_single_winner(pool: SqlitePool) {
        let owner = seed_account(&pool, "a@x.com").await;
        let item = ItemRepository::new(&pool)
            .create_for_owner(owner, &wallet(ItemType::Lost))
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            async {
                ItemRepository::new(&pool)
                    .mark_returned(item.id, owner)
                    .await
                    .unwrap()
            },
            async {
                ItemRepository::new(&pool)
                    .mark_returned(item.id, owner)
                    .await
                    .unwrap()
            },
        );

        // Exactly one caller observes the transition.
        assert!(a ^ b);

        let account = AccountRepository::new(&pool)
            .get_by_id(owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.returned_count, 1);
    }
}
