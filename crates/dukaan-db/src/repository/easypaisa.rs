//! # EasyPaisa Repository
//!
//! Database operations for mobile-money transactions, plus the per-day
//! breakdown the EasyPaisa report view renders.
//!
//! ## Report Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                EasyPaisa listing response                               │
//! │                                                                         │
//! │  transactions: [ ... newest first ... ]                                │
//! │  summary:      total_amount, total_profit,                             │
//! │                withdraw_count, transfer_count                          │
//! │  daily:        [ {date, count, total_amount, total_profit} ... ]       │
//! │                sorted newest-date-first                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use dukaan_core::{DateWindow, EasyPaisaTransaction};

const SELECT_COLUMNS: &str = "SELECT id, transaction_type, client_name, phone_number, \
     total_amount, profit_amount, transaction_date FROM easypaisa";

/// Windowed totals over EasyPaisa transactions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EasyPaisaSummary {
    pub total_amount: f64,
    pub total_profit: f64,
    pub withdraw_count: i64,
    pub transfer_count: i64,
}

/// One calendar day's worth of transactions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EasyPaisaDailyRow {
    pub date: NaiveDate,
    pub count: i64,
    pub total_amount: f64,
    pub total_profit: f64,
}

/// Repository for EasyPaisa database operations.
#[derive(Debug, Clone)]
pub struct EasyPaisaRepository {
    pool: SqlitePool,
}

impl EasyPaisaRepository {
    /// Creates a new EasyPaisaRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EasyPaisaRepository { pool }
    }

    /// Inserts a new transaction with the current time.
    ///
    /// The caller has already validated `transaction_type` against the
    /// allowed labels.
    pub async fn insert(
        &self,
        transaction_type: &str,
        client_name: &str,
        phone_number: &str,
        total_amount: f64,
        profit_amount: f64,
    ) -> DbResult<EasyPaisaTransaction> {
        let now = Utc::now();

        debug!(transaction_type = %transaction_type, total_amount = %total_amount, "Inserting EasyPaisa transaction");

        let result = sqlx::query(
            r#"
            INSERT INTO easypaisa
                (transaction_type, client_name, phone_number, total_amount, profit_amount, transaction_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(transaction_type)
        .bind(client_name)
        .bind(phone_number)
        .bind(total_amount)
        .bind(profit_amount)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(EasyPaisaTransaction {
            id: result.last_insert_rowid(),
            transaction_type: transaction_type.to_string(),
            client_name: client_name.to_string(),
            phone_number: phone_number.to_string(),
            total_amount,
            profit_amount,
            transaction_date: now,
        })
    }

    /// Lists transactions, newest first, optionally restricted to a window.
    ///
    /// `None` means no filter (the fallback for malformed dates).
    pub async fn list(&self, window: Option<DateWindow>) -> DbResult<Vec<EasyPaisaTransaction>> {
        let transactions = match window {
            Some(window) => {
                let (start, end) = window.bounds();
                sqlx::query_as::<_, EasyPaisaTransaction>(&format!(
                    "{SELECT_COLUMNS} WHERE transaction_date >= ?1 AND transaction_date <= ?2 \
                     ORDER BY transaction_date DESC"
                ))
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EasyPaisaTransaction>(&format!(
                    "{SELECT_COLUMNS} ORDER BY transaction_date DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(transactions)
    }

    /// Deletes a transaction by id.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting EasyPaisa transaction");

        let result = sqlx::query("DELETE FROM easypaisa WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("EasyPaisa transaction", id.to_string()));
        }

        Ok(())
    }

    /// Windowed totals: amount sum, profit sum, and per-type counts.
    pub async fn summary(&self, window: Option<DateWindow>) -> DbResult<EasyPaisaSummary> {
        const SUMS: &str = r#"
            SELECT
                COALESCE(SUM(total_amount), 0.0) AS total_amount,
                COALESCE(SUM(profit_amount), 0.0) AS total_profit,
                COALESCE(SUM(CASE WHEN transaction_type = 'Withdraw' THEN 1 ELSE 0 END), 0)
                    AS withdraw_count,
                COALESCE(SUM(CASE WHEN transaction_type = 'Transfer' THEN 1 ELSE 0 END), 0)
                    AS transfer_count
            FROM easypaisa
        "#;

        let summary = match window {
            Some(window) => {
                let (start, end) = window.bounds();
                sqlx::query_as::<_, EasyPaisaSummary>(&format!(
                    "{SUMS} WHERE transaction_date >= ?1 AND transaction_date <= ?2"
                ))
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EasyPaisaSummary>(SUMS)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(summary)
    }

    /// Per-calendar-day breakdown, newest date first.
    pub async fn daily_breakdown(
        &self,
        window: Option<DateWindow>,
    ) -> DbResult<Vec<EasyPaisaDailyRow>> {
        const GROUPED: &str = r#"
            SELECT
                date(transaction_date) AS date,
                COUNT(*) AS count,
                COALESCE(SUM(total_amount), 0.0) AS total_amount,
                COALESCE(SUM(profit_amount), 0.0) AS total_profit
            FROM easypaisa
        "#;
        const TAIL: &str = " GROUP BY date(transaction_date) ORDER BY date(transaction_date) DESC";

        let rows = match window {
            Some(window) => {
                let (start, end) = window.bounds();
                sqlx::query_as::<_, EasyPaisaDailyRow>(&format!(
                    "{GROUPED} WHERE transaction_date >= ?1 AND transaction_date <= ?2 {TAIL}"
                ))
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EasyPaisaDailyRow>(&format!("{GROUPED} {TAIL}"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_net_amount() {
        let db = db().await;
        let txn = db
            .easypaisa()
            .insert("Withdraw", "Ali", "03001234567", 1000.0, 50.0)
            .await
            .unwrap();

        assert!(txn.id > 0);
        assert_eq!(txn.net_amount(), 950.0);
    }

    #[tokio::test]
    async fn test_summary_counts_by_type() {
        let db = db().await;
        let repo = db.easypaisa();

        repo.insert("Withdraw", "Ali", "0300", 1000.0, 50.0)
            .await
            .unwrap();
        repo.insert("Withdraw", "Sara", "0301", 500.0, 25.0)
            .await
            .unwrap();
        repo.insert("Transfer", "Bilal", "0302", 2000.0, 40.0)
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let summary = repo
            .summary(Some(DateWindow::single_day(today)))
            .await
            .unwrap();

        assert_eq!(summary.total_amount, 3500.0);
        assert_eq!(summary.total_profit, 115.0);
        assert_eq!(summary.withdraw_count, 2);
        assert_eq!(summary.transfer_count, 1);
    }

    #[tokio::test]
    async fn test_daily_breakdown_scenario() {
        let db = db().await;
        let repo = db.easypaisa();

        repo.insert("Withdraw", "Ali", "0300", 1000.0, 50.0)
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let daily = repo
            .daily_breakdown(Some(DateWindow::single_day(today)))
            .await
            .unwrap();

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, today);
        assert_eq!(daily[0].count, 1);
        assert_eq!(daily[0].total_amount, 1000.0);
        assert_eq!(daily[0].total_profit, 50.0);
    }

    #[tokio::test]
    async fn test_empty_window_yields_zero_summary() {
        let db = db().await;
        let window = DateWindow::parse("2001-01-01", "2001-01-31").unwrap();

        let summary = db.easypaisa().summary(Some(window)).await.unwrap();
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.total_profit, 0.0);
        assert_eq!(summary.withdraw_count, 0);
        assert_eq!(summary.transfer_count, 0);

        assert!(db
            .easypaisa()
            .daily_breakdown(Some(window))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = db().await;
        let repo = db.easypaisa();

        let txn = repo
            .insert("Transfer", "Ali", "0300", 100.0, 5.0)
            .await
            .unwrap();
        repo.delete(txn.id).await.unwrap();

        assert!(repo.list(None).await.unwrap().is_empty());
        assert!(matches!(
            repo.delete(txn.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
