//! Expense handlers. The expense date is a calendar date from the form,
//! not the insertion time; a malformed date here is fatal (400) because
//! there is nothing sensible to fall back to.

use axum::extract::{Path, State};
use axum::{Form, Json};
use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::json;

use dukaan_core::reporting::parse_date;
use dukaan_core::validation::{parse_price, validate_text};

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    pub title: String,
    pub category: String,
    pub amount: String,
    pub expense_date: String,
}

/// `GET /expenses`: all expenses, newest first.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let expenses = state.db.expenses().list().await?;

    Ok(Json(json!({
        "expenses": expenses,
        "count": expenses.len(),
    })))
}

/// `POST /expenses/add`
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<ExpenseForm>,
) -> ApiResult<Json<serde_json::Value>> {
    let title = validate_text("title", &form.title, 100)?;
    let category = validate_text("category", &form.category, 50)?;
    let amount = parse_price("amount", &form.amount)?;
    let expense_date = parse_date(&form.expense_date)?
        .and_time(NaiveTime::MIN)
        .and_utc();

    let expense = state
        .db
        .expenses()
        .insert(title, category, amount, expense_date)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Expense added successfully!",
        "expense": expense,
    })))
}

/// `GET /expenses/delete/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.db.expenses().delete(id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Expense deleted successfully!",
    })))
}
