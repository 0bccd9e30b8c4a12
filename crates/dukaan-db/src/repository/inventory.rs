//! # Inventory Repository
//!
//! Database operations for stock items.
//!
//! ## Key Operations
//! - Substring search across item_name/category/supplier (OR semantics)
//! - Low-stock filtering for the reorder view
//! - Point-of-sale lookup (name match AND in stock)
//! - Cascade delete of dependent sales (enforced by the schema's FK)
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Search Works                                     │
//! │                                                                         │
//! │  User types: "cola"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lower(item_name) LIKE '%cola%'                                        │
//! │     OR lower(category) LIKE '%cola%'                                   │
//! │     OR lower(supplier) LIKE '%cola%'                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Pepsi Cola 500ml │ Drinks │ ...  ← name match                         │
//! │  Mineral Water    │ Cola Co│ ...  ← supplier match                     │
//! │                                                                         │
//! │  A LIKE against a NULL supplier is NULL, which filters out cleanly.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use dukaan_core::{InventoryItem, LOW_STOCK_THRESHOLD};

const SELECT_COLUMNS: &str =
    "SELECT id, item_name, category, purchase_price, quantity, supplier, added_date FROM inventory";

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Inserts a new item with the current time as its added date.
    ///
    /// Returns the persisted record including its generated id.
    pub async fn insert(
        &self,
        item_name: &str,
        category: &str,
        purchase_price: f64,
        quantity: i64,
        supplier: Option<&str>,
    ) -> DbResult<InventoryItem> {
        let now = Utc::now();

        debug!(item_name = %item_name, "Inserting inventory item");

        let result = sqlx::query(
            r#"
            INSERT INTO inventory (item_name, category, purchase_price, quantity, supplier, added_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(item_name)
        .bind(category)
        .bind(purchase_price)
        .bind(quantity)
        .bind(supplier)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(InventoryItem {
            id: result.last_insert_rowid(),
            item_name: item_name.to_string(),
            category: category.to_string(),
            purchase_price,
            quantity,
            supplier: supplier.map(str::to_string),
            added_date: now,
        })
    }

    /// Lists items, newest-added first.
    ///
    /// ## Arguments
    /// * `search` - optional case-insensitive substring matched against
    ///   item_name OR category OR supplier
    /// * `low_stock_only` - restrict to items at or below the low-stock threshold
    pub async fn list(
        &self,
        search: Option<&str>,
        low_stock_only: bool,
    ) -> DbResult<Vec<InventoryItem>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_COLUMNS);
        builder.push(" WHERE 1 = 1");

        if let Some(query) = search.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", query.to_lowercase());
            builder.push(" AND (lower(item_name) LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR lower(category) LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR lower(supplier) LIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        if low_stock_only {
            builder.push(" AND quantity <= ");
            builder.push_bind(LOW_STOCK_THRESHOLD);
        }

        builder.push(" ORDER BY added_date DESC");

        let items = builder
            .build_query_as::<InventoryItem>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Inventory list returned items");
        Ok(items)
    }

    /// Gets an item by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Overwrites all mutable fields of an existing item.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - the id doesn't exist
    pub async fn update(
        &self,
        id: i64,
        item_name: &str,
        category: &str,
        purchase_price: f64,
        quantity: i64,
        supplier: Option<&str>,
    ) -> DbResult<()> {
        debug!(id = %id, "Updating inventory item");

        let result = sqlx::query(
            r#"
            UPDATE inventory SET
                item_name = ?2,
                category = ?3,
                purchase_price = ?4,
                quantity = ?5,
                supplier = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(item_name)
        .bind(category)
        .bind(purchase_price)
        .bind(quantity)
        .bind(supplier)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory item", id.to_string()));
        }

        Ok(())
    }

    /// Deletes an item by id.
    ///
    /// The schema's `ON DELETE CASCADE` removes all sales referencing it
    /// in the same statement.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting inventory item");

        let result = sqlx::query("DELETE FROM inventory WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory item", id.to_string()));
        }

        Ok(())
    }

    /// Point-of-sale lookup: item_name substring match AND in stock.
    pub async fn search_in_stock(&self, query: &str) -> DbResult<Vec<InventoryItem>> {
        let pattern = format!("%{}%", query.trim().to_lowercase());

        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "{SELECT_COLUMNS} WHERE lower(item_name) LIKE ?1 AND quantity > 0"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// All items at or below the low-stock threshold (for the dashboard).
    pub async fn low_stock(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "{SELECT_COLUMNS} WHERE quantity <= ?1 ORDER BY quantity ASC"
        ))
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Total purchase value of all stock on hand, over all items (unwindowed).
    pub async fn total_value(&self) -> DbResult<f64> {
        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(purchase_price * quantity), 0.0) FROM inventory",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_returns_generated_id() {
        let db = db().await;
        let repo = db.inventory();

        let first = repo
            .insert("Widget", "General", 10.0, 5, None)
            .await
            .unwrap();
        let second = repo
            .insert("Gadget", "General", 4.0, 2, Some("ACME"))
            .await
            .unwrap();

        assert!(first.id > 0);
        assert_eq!(second.id, first.id + 1);
        assert_eq!(second.supplier.as_deref(), Some("ACME"));
    }

    #[tokio::test]
    async fn test_list_search_matches_any_of_three_fields() {
        let db = db().await;
        let repo = db.inventory();

        repo.insert("Pepsi Cola", "Drinks", 1.0, 5, None)
            .await
            .unwrap();
        repo.insert("Chips", "Snacks", 1.0, 5, Some("Cola Co"))
            .await
            .unwrap();
        repo.insert("Soap", "Household", 1.0, 5, None).await.unwrap();

        let hits = repo.list(Some("cola"), false).await.unwrap();
        assert_eq!(hits.len(), 2);

        // Case-insensitive.
        let hits = repo.list(Some("COLA"), false).await.unwrap();
        assert_eq!(hits.len(), 2);

        let all = repo.list(None, false).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_low_stock_filter() {
        let db = db().await;
        let repo = db.inventory();

        repo.insert("Plenty", "A", 1.0, 50, None).await.unwrap();
        repo.insert("Scarce", "A", 1.0, 10, None).await.unwrap();
        repo.insert("Gone", "A", 1.0, 0, None).await.unwrap();

        let low = repo.list(None, true).await.unwrap();
        let names: Vec<_> = low.iter().map(|i| i.item_name.as_str()).collect();
        assert_eq!(low.len(), 2);
        assert!(names.contains(&"Scarce"));
        assert!(names.contains(&"Gone"));
    }

    #[tokio::test]
    async fn test_update_and_not_found() {
        let db = db().await;
        let repo = db.inventory();

        let item = repo.insert("Widget", "A", 10.0, 5, None).await.unwrap();
        repo.update(item.id, "Widget v2", "B", 12.0, 7, Some("ACME"))
            .await
            .unwrap();

        let updated = repo.get_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(updated.item_name, "Widget v2");
        assert_eq!(updated.purchase_price, 12.0);
        assert_eq!(updated.quantity, 7);

        let missing = repo.update(9999, "X", "Y", 1.0, 1, None).await;
        assert!(matches!(missing, Err(DbError::NotFound { .. })));

        let missing = repo.delete(9999).await;
        assert!(matches!(missing, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search_in_stock_excludes_empty() {
        let db = db().await;
        let repo = db.inventory();

        repo.insert("Widget A", "A", 1.0, 3, None).await.unwrap();
        repo.insert("Widget B", "A", 1.0, 0, None).await.unwrap();

        let hits = repo.search_in_stock("widget").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item_name, "Widget A");

        // An empty query matches every in-stock item.
        let all = repo.search_in_stock("").await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].item_name, "Widget A");
    }

    #[tokio::test]
    async fn test_total_value() {
        let db = db().await;
        let repo = db.inventory();

        assert_eq!(repo.total_value().await.unwrap(), 0.0);

        repo.insert("A", "X", 10.0, 5, None).await.unwrap();
        repo.insert("B", "X", 2.5, 4, None).await.unwrap();

        assert_eq!(repo.total_value().await.unwrap(), 60.0);
    }
}
