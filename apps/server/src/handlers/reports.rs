//! Dashboard, revenue, and report handlers.
//!
//! All three default to the current month-to-date window and fall back to
//! it (with a warning) on malformed dates. The trailing 12-month series
//! uses exact calendar-month boundaries.

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use dukaan_core::reporting::trailing_months;
use dukaan_core::DateWindow;

use crate::error::ApiResult;
use crate::handlers::{reporting_window, WindowQuery};
use crate::AppState;

/// `GET /`: the root is just the dashboard.
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// `GET /dashboard?start_date&end_date`
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let (window, warning) = reporting_window(&query, DateWindow::month_to_date(today));

    let reports = state.db.reports();
    let total_sales = reports.revenue_total(window).await?;
    let total_profit = reports.profit_total(window).await?;
    let total_expenses = reports.expenses_total(window).await?;

    let total_inventory_value = state.db.inventory().total_value().await?;
    let recent_sales = state.db.sales().recent(10).await?;
    let low_stock_items = state.db.inventory().low_stock().await?;
    let monthly = reports.monthly_series(&trailing_months(today, 12)).await?;

    Ok(Json(json!({
        "total_inventory_value": total_inventory_value,
        "total_sales": total_sales,
        "total_profit": total_profit,
        "total_expenses": total_expenses,
        "net_profit": total_profit - total_expenses,
        "recent_sales": recent_sales,
        "low_stock_items": low_stock_items,
        "monthly": monthly,
        "start_date": window.start.to_string(),
        "end_date": window.end.to_string(),
        "warning": warning,
    })))
}

/// `GET /revenue?start_date&end_date`
pub async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let (window, warning) = reporting_window(&query, DateWindow::month_to_date(today));

    let reports = state.db.reports();
    let total_revenue = reports.revenue_total(window).await?;
    let total_profit = reports.profit_total(window).await?;
    let total_expenses = reports.expenses_total(window).await?;
    let category_revenue = reports.category_revenue(window).await?;

    Ok(Json(json!({
        "total_revenue": total_revenue,
        "total_profit": total_profit,
        "total_expenses": total_expenses,
        "net_profit": total_profit - total_expenses,
        "category_revenue": category_revenue,
        "start_date": window.start.to_string(),
        "end_date": window.end.to_string(),
        "warning": warning,
    })))
}

/// `GET /reports?start_date&end_date`
pub async fn reports(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let (window, warning) = reporting_window(&query, DateWindow::month_to_date(today));

    let repo = state.db.reports();
    let daily_sales = repo.daily_sales(window).await?;
    let category_inventory = repo.category_inventory().await?;
    let top_items = repo.top_items(window, 10).await?;

    Ok(Json(json!({
        "daily_sales": daily_sales,
        "category_inventory": category_inventory,
        "top_items": top_items,
        "start_date": window.start.to_string(),
        "end_date": window.end.to_string(),
        "warning": warning,
    })))
}
