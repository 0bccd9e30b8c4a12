//! # Sale Repository
//!
//! Database operations for sales.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  record_sale() - one transaction                        │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    │                                                                    │
//! │    ├── SELECT quantity FROM inventory WHERE id = ?                     │
//! │    │       │                                                            │
//! │    │       ├── no row          → NotFound, ROLLBACK                    │
//! │    │       ├── qty < requested → InsufficientStock, ROLLBACK           │
//! │    │       │                                                            │
//! │    ├── INSERT INTO sales (...)                                         │
//! │    ├── UPDATE inventory SET quantity = quantity - ?                    │
//! │    │                                                                    │
//! │  COMMIT  ← both rows or neither                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stock check and the decrement run on the same connection inside the
//! transaction, so a crash between the two statements cannot leave a sale
//! without its matching stock decrement.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use dukaan_core::{DateWindow, Sale};

const SELECT_COLUMNS: &str =
    "SELECT id, inventory_id, quantity_sold, selling_price, payment_method, sale_date FROM sales";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale and decrements the item's stock as one atomic unit.
    ///
    /// ## Arguments
    /// * `inventory_id` - item the stock is drawn from
    /// * `quantity_sold` - units sold (must not exceed current stock)
    /// * `selling_price` - per-unit price at the time of sale
    /// * `payment_method` - payment label, e.g. "Cash"
    ///
    /// ## Errors
    /// * `DbError::NotFound` - unknown inventory id
    /// * `DbError::InsufficientStock` - requested more than on hand;
    ///   nothing is written
    pub async fn record_sale(
        &self,
        inventory_id: i64,
        quantity_sold: i64,
        selling_price: f64,
        payment_method: &str,
    ) -> DbResult<Sale> {
        debug!(
            inventory_id = %inventory_id,
            quantity_sold = %quantity_sold,
            "Recording sale"
        );

        let mut tx = self.pool.begin().await?;

        let available: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM inventory WHERE id = ?1")
                .bind(inventory_id)
                .fetch_optional(&mut *tx)
                .await?;

        let available = match available {
            Some(quantity) => quantity,
            None => return Err(DbError::not_found("Inventory item", inventory_id.to_string())),
        };

        if available < quantity_sold {
            return Err(DbError::InsufficientStock {
                available,
                requested: quantity_sold,
            });
        }

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO sales (inventory_id, quantity_sold, selling_price, payment_method, sale_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(inventory_id)
        .bind(quantity_sold)
        .bind(selling_price)
        .bind(payment_method)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE inventory SET quantity = quantity - ?2 WHERE id = ?1")
            .bind(inventory_id)
            .bind(quantity_sold)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Sale {
            id: result.last_insert_rowid(),
            inventory_id,
            quantity_sold,
            selling_price,
            payment_method: payment_method.to_string(),
            sale_date: now,
        })
    }

    /// Lists sales, newest first, optionally restricted to a date window.
    ///
    /// `None` means no filter at all (the fallback when the caller received
    /// malformed dates).
    pub async fn list(&self, window: Option<DateWindow>) -> DbResult<Vec<Sale>> {
        let sales = match window {
            Some(window) => {
                let (start, end) = window.bounds();
                sqlx::query_as::<_, Sale>(&format!(
                    "{SELECT_COLUMNS} WHERE sale_date >= ?1 AND sale_date <= ?2 ORDER BY sale_date DESC"
                ))
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Sale>(&format!("{SELECT_COLUMNS} ORDER BY sale_date DESC"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(sales)
    }

    /// The `limit` most recent sales across all time (dashboard widget).
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales =
            sqlx::query_as::<_, Sale>(&format!("{SELECT_COLUMNS} ORDER BY sale_date DESC LIMIT ?1"))
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        Ok(sales)
    }

    /// Sums of sale totals split by payment method: (Cash, everything else).
    pub async fn method_totals(&self, window: Option<DateWindow>) -> DbResult<(f64, f64)> {
        const SUMS: &str = r#"
            SELECT
                COALESCE(SUM(CASE WHEN payment_method = 'Cash'
                             THEN selling_price * quantity_sold ELSE 0.0 END), 0.0),
                COALESCE(SUM(CASE WHEN payment_method <> 'Cash'
                             THEN selling_price * quantity_sold ELSE 0.0 END), 0.0)
            FROM sales
        "#;

        let totals: (f64, f64) = match window {
            Some(window) => {
                let (start, end) = window.bounds();
                sqlx::query_as(&format!("{SUMS} WHERE sale_date >= ?1 AND sale_date <= ?2"))
                    .bind(start)
                    .bind(end)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => sqlx::query_as(SUMS).fetch_one(&self.pool).await?,
        };

        Ok(totals)
    }

    /// Count of all sale rows (test/diagnostic helper).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Backdates a sale row (test fixture helper for windowed queries).
#[doc(hidden)]
pub async fn set_sale_date(pool: &SqlitePool, sale_id: i64, date: DateTime<Utc>) -> DbResult<()> {
    sqlx::query("UPDATE sales SET sale_date = ?2 WHERE id = ?1")
        .bind(sale_id)
        .bind(date)
        .execute(pool)
        .await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
