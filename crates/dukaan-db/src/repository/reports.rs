//! # Reports Repository
//!
//! Read-only aggregation queries for the dashboard, revenue, and reports
//! views. Everything here reduces rows to scalars or grouped rows; nothing
//! here mutates.
//!
//! ## Profit Uses Current Cost
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            profit = (selling_price - purchase_price) * qty              │
//! │                                      ▲                                  │
//! │                                      │                                  │
//! │                   the item's CURRENT purchase price, via                │
//! │                   JOIN inventory i ON i.id = s.inventory_id             │
//! │                                                                         │
//! │  Editing an item's cost rewrites historical profit figures. This is    │
//! │  the documented contract of the system (no cost-at-sale snapshot is    │
//! │  stored); the join makes the lookup explicit instead of hiding it in   │
//! │  a lazy relationship.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::DbResult;
use dukaan_core::reporting::MonthSpan;
use dukaan_core::DateWindow;

/// One calendar day of sales activity.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailySalesRow {
    pub date: NaiveDate,
    pub num_sales: i64,
    pub total_sales: f64,
    /// Cost of the units sold, at each item's current purchase price.
    pub total_purchase: f64,
    pub total_profit: f64,
}

/// Revenue attributed to one inventory category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryRevenueRow {
    pub category: String,
    pub total: f64,
}

/// Stock snapshot for one inventory category (unwindowed).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryInventoryRow {
    pub category: String,
    pub num_items: i64,
    pub total_quantity: i64,
    pub total_value: f64,
}

/// A best-selling item within a window.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TopItemRow {
    pub item_name: String,
    pub total_sold: i64,
    pub total_revenue: f64,
}

/// One month of the trailing dashboard series.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyBucket {
    pub label: String,
    pub sales: f64,
    pub profit: f64,
    pub expenses: f64,
}

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportsRepository {
    pool: SqlitePool,
}

impl ReportsRepository {
    /// Creates a new ReportsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportsRepository { pool }
    }

    /// Total sales revenue within the window.
    pub async fn revenue_total(&self, window: DateWindow) -> DbResult<f64> {
        let (start, end) = window.bounds();

        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(selling_price * quantity_sold), 0.0)
            FROM sales
            WHERE sale_date >= ?1 AND sale_date <= ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Total sales profit within the window, against current item cost.
    pub async fn profit_total(&self, window: DateWindow) -> DbResult<f64> {
        let (start, end) = window.bounds();

        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM((s.selling_price - i.purchase_price) * s.quantity_sold), 0.0)
            FROM sales s
            JOIN inventory i ON i.id = s.inventory_id
            WHERE s.sale_date >= ?1 AND s.sale_date <= ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Total expenses within the window.
    pub async fn expenses_total(&self, window: DateWindow) -> DbResult<f64> {
        let (start, end) = window.bounds();

        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0.0)
            FROM expenses
            WHERE expense_date >= ?1 AND expense_date <= ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Per-calendar-day sales breakdown within the window, oldest date first.
    pub async fn daily_sales(&self, window: DateWindow) -> DbResult<Vec<DailySalesRow>> {
        let (start, end) = window.bounds();

        let rows = sqlx::query_as::<_, DailySalesRow>(
            r#"
            SELECT
                date(s.sale_date) AS date,
                COUNT(*) AS num_sales,
                COALESCE(SUM(s.selling_price * s.quantity_sold), 0.0) AS total_sales,
                COALESCE(SUM(i.purchase_price * s.quantity_sold), 0.0) AS total_purchase,
                COALESCE(SUM((s.selling_price - i.purchase_price) * s.quantity_sold), 0.0)
                    AS total_profit
            FROM sales s
            JOIN inventory i ON i.id = s.inventory_id
            WHERE s.sale_date >= ?1 AND s.sale_date <= ?2
            GROUP BY date(s.sale_date)
            ORDER BY date(s.sale_date) ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Revenue grouped by inventory category within the window.
    pub async fn category_revenue(&self, window: DateWindow) -> DbResult<Vec<CategoryRevenueRow>> {
        let (start, end) = window.bounds();

        let rows = sqlx::query_as::<_, CategoryRevenueRow>(
            r#"
            SELECT
                i.category AS category,
                COALESCE(SUM(s.quantity_sold * s.selling_price), 0.0) AS total
            FROM sales s
            JOIN inventory i ON i.id = s.inventory_id
            WHERE s.sale_date >= ?1 AND s.sale_date <= ?2
            GROUP BY i.category
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Per-category inventory snapshot: item count, quantity sum, value sum.
    ///
    /// Unwindowed: this describes the stock on hand right now.
    pub async fn category_inventory(&self) -> DbResult<Vec<CategoryInventoryRow>> {
        let rows = sqlx::query_as::<_, CategoryInventoryRow>(
            r#"
            SELECT
                category,
                COUNT(*) AS num_items,
                COALESCE(SUM(quantity), 0) AS total_quantity,
                COALESCE(SUM(purchase_price * quantity), 0.0) AS total_value
            FROM inventory
            GROUP BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Top items by units sold within the window.
    ///
    /// Ties fall back to SQLite's iteration order; the contract does not
    /// specify a secondary key.
    pub async fn top_items(&self, window: DateWindow, limit: u32) -> DbResult<Vec<TopItemRow>> {
        let (start, end) = window.bounds();

        let rows = sqlx::query_as::<_, TopItemRow>(
            r#"
            SELECT
                i.item_name AS item_name,
                COALESCE(SUM(s.quantity_sold), 0) AS total_sold,
                COALESCE(SUM(s.selling_price * s.quantity_sold), 0.0) AS total_revenue
            FROM sales s
            JOIN inventory i ON i.id = s.inventory_id
            WHERE s.sale_date >= ?1 AND s.sale_date <= ?2
            GROUP BY i.item_name
            ORDER BY SUM(s.quantity_sold) DESC
            LIMIT ?3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Sales/profit/expense sums for each month span, in span order.
    ///
    /// Twelve sequential aggregate queries per dashboard render. Acceptable
    /// at this scale; rollup tables would be the next step if it ever isn't.
    pub async fn monthly_series(&self, spans: &[MonthSpan]) -> DbResult<Vec<MonthlyBucket>> {
        let mut buckets = Vec::with_capacity(spans.len());

        for span in spans {
            buckets.push(MonthlyBucket {
                label: span.label.clone(),
                sales: self.revenue_total(span.window).await?,
                profit: self.profit_total(span.window).await?,
                expenses: self.expenses_total(span.window).await?,
            });
        }

        Ok(buckets)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::sale::set_sale_date;
    use chrono::{NaiveTime, Utc};
    use dukaan_core::reporting::trailing_months;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn today_window() -> DateWindow {
        DateWindow::single_day(Utc::now().date_naive())
    }

    #[tokio::test]
    async fn test_widget_scenario_totals() {
        let db = db().await;
        let item = db
            .inventory()
            .insert("Widget", "General", 10.0, 5, None)
            .await
            .unwrap();
        db.sales().record_sale(item.id, 3, 15.0, "Cash").await.unwrap();

        let reports = db.reports();
        let window = today_window();

        assert_eq!(reports.revenue_total(window).await.unwrap(), 45.0);
        assert_eq!(reports.profit_total(window).await.unwrap(), 15.0);
        assert_eq!(reports.expenses_total(window).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_profit_follows_current_cost() {
        let db = db().await;
        let item = db
            .inventory()
            .insert("Widget", "General", 10.0, 5, None)
            .await
            .unwrap();
        db.sales().record_sale(item.id, 3, 15.0, "Cash").await.unwrap();

        // Raising the item's cost after the fact rewrites historical profit.
        db.inventory()
            .update(item.id, "Widget", "General", 14.0, 2, None)
            .await
            .unwrap();

        let profit = db.reports().profit_total(today_window()).await.unwrap();
        assert_eq!(profit, 3.0);
    }

    #[tokio::test]
    async fn test_daily_sales_breakdown() {
        let db = db().await;
        let item = db
            .inventory()
            .insert("Widget", "General", 10.0, 100, None)
            .await
            .unwrap();
        let sales = db.sales();

        sales.record_sale(item.id, 2, 15.0, "Cash").await.unwrap();
        sales.record_sale(item.id, 1, 20.0, "Card").await.unwrap();

        let rows = db.reports().daily_sales(today_window()).await.unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.date, Utc::now().date_naive());
        assert_eq!(row.num_sales, 2);
        assert_eq!(row.total_sales, 50.0);
        assert_eq!(row.total_purchase, 30.0);
        assert_eq!(row.total_profit, 20.0);
    }

    #[tokio::test]
    async fn test_category_revenue_and_inventory() {
        let db = db().await;
        let inventory = db.inventory();

        let drink = inventory.insert("Cola", "Drinks", 1.0, 50, None).await.unwrap();
        let snack = inventory.insert("Chips", "Snacks", 2.0, 30, None).await.unwrap();
        inventory.insert("Juice", "Drinks", 3.0, 10, None).await.unwrap();

        db.sales().record_sale(drink.id, 10, 2.0, "Cash").await.unwrap();
        db.sales().record_sale(snack.id, 5, 3.0, "Cash").await.unwrap();

        let revenue = db.reports().category_revenue(today_window()).await.unwrap();
        assert_eq!(revenue.len(), 2);
        let drinks = revenue.iter().find(|r| r.category == "Drinks").unwrap();
        assert_eq!(drinks.total, 20.0);

        let snapshot = db.reports().category_inventory().await.unwrap();
        let drinks = snapshot.iter().find(|r| r.category == "Drinks").unwrap();
        assert_eq!(drinks.num_items, 2);
        // 40 remaining colas + 10 juices.
        assert_eq!(drinks.total_quantity, 50);
        assert_eq!(drinks.total_value, 70.0);
    }

    #[tokio::test]
    async fn test_top_items_orders_by_units_sold() {
        let db = db().await;
        let inventory = db.inventory();
        let sales = db.sales();

        let a = inventory.insert("A", "X", 1.0, 100, None).await.unwrap();
        let b = inventory.insert("B", "X", 1.0, 100, None).await.unwrap();
        let c = inventory.insert("C", "X", 1.0, 100, None).await.unwrap();

        sales.record_sale(a.id, 5, 2.0, "Cash").await.unwrap();
        sales.record_sale(b.id, 9, 2.0, "Cash").await.unwrap();
        sales.record_sale(c.id, 1, 2.0, "Cash").await.unwrap();

        let top = db.reports().top_items(today_window(), 2).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].item_name, "B");
        assert_eq!(top[0].total_sold, 9);
        assert_eq!(top[0].total_revenue, 18.0);
        assert_eq!(top[1].item_name, "A");
    }

    #[tokio::test]
    async fn test_empty_window_aggregates_are_zero() {
        let db = db().await;
        let window = DateWindow::parse("2001-01-01", "2001-01-31").unwrap();
        let reports = db.reports();

        assert_eq!(reports.revenue_total(window).await.unwrap(), 0.0);
        assert_eq!(reports.profit_total(window).await.unwrap(), 0.0);
        assert_eq!(reports.expenses_total(window).await.unwrap(), 0.0);
        assert!(reports.daily_sales(window).await.unwrap().is_empty());
        assert!(reports.category_revenue(window).await.unwrap().is_empty());
        assert!(reports.top_items(window, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_monthly_series_places_sales_in_their_month() {
        let db = db().await;
        let item = db
            .inventory()
            .insert("Widget", "General", 10.0, 100, None)
            .await
            .unwrap();
        let sales = db.sales();

        sales.record_sale(item.id, 1, 15.0, "Cash").await.unwrap();
        let older = sales.record_sale(item.id, 2, 15.0, "Cash").await.unwrap();

        // Move one sale back two calendar months.
        let today = Utc::now().date_naive();
        let spans = trailing_months(today, 12);
        let two_back = spans[9].window.start;
        set_sale_date(
            db.pool(),
            older.id,
            two_back
                .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
                .and_utc(),
        )
        .await
        .unwrap();

        let series = db.reports().monthly_series(&spans).await.unwrap();
        assert_eq!(series.len(), 12);

        assert_eq!(series[9].sales, 30.0);
        assert_eq!(series[9].profit, 10.0);
        assert_eq!(series[11].sales, 15.0);
        assert_eq!(series[11].profit, 5.0);
        // Months with no activity stay at zero.
        assert_eq!(series[0].sales, 0.0);
    }
}
