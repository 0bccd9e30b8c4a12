//! EasyPaisa mobile-money handlers.
//!
//! The listing view carries its own small report: windowed totals,
//! per-type counts, and a per-day breakdown. `report_type` picks the
//! *default* window only (daily → today, monthly → month-to-date);
//! explicit dates always win.

use axum::extract::{Path, Query, State};
use axum::{Form, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use dukaan_core::validation::{parse_price, validate_text, validate_transaction_type};
use dukaan_core::DateWindow;

use crate::error::ApiResult;
use crate::handlers::{listing_window, WindowQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub transaction_type: String,
    pub client_name: String,
    pub phone_number: String,
    pub total_amount: String,
    pub profit_amount: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EasyPaisaQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub report_type: Option<String>,
}

/// `GET /easypaisa?start_date&end_date&report_type`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EasyPaisaQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();

    let report_type = match query.report_type.as_deref() {
        Some("monthly") => "monthly",
        _ => "daily",
    };
    let default = if report_type == "monthly" {
        DateWindow::month_to_date(today)
    } else {
        DateWindow::single_day(today)
    };

    let window_query = WindowQuery {
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let (window, warning) = listing_window(&window_query, default);

    let repo = state.db.easypaisa();
    let transactions = repo.list(window).await?;
    let summary = repo.summary(window).await?;
    let daily = repo.daily_breakdown(window).await?;

    Ok(Json(json!({
        "transactions": transactions,
        "summary": summary,
        "daily": daily,
        "report_type": report_type,
        "warning": warning,
    })))
}

/// `POST /easypaisa/add`
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> ApiResult<Json<serde_json::Value>> {
    let transaction_type = validate_transaction_type(&form.transaction_type)?;
    let client_name = validate_text("client_name", &form.client_name, 100)?;
    let phone_number = validate_text("phone_number", &form.phone_number, 20)?;
    let total_amount = parse_price("total_amount", &form.total_amount)?;
    let profit_amount = parse_price("profit_amount", &form.profit_amount)?;

    let transaction = state
        .db
        .easypaisa()
        .insert(
            transaction_type.as_str(),
            client_name,
            phone_number,
            total_amount,
            profit_amount,
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Transaction added successfully!",
        "transaction": transaction,
    })))
}

/// `GET /easypaisa/delete/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.db.easypaisa().delete(id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Transaction deleted successfully!",
    })))
}
