//! Sales handlers: the stock-decrementing sale form and the windowed
//! listing with cash/other payment totals.

use axum::extract::{Query, State};
use axum::{Form, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use dukaan_core::validation::{optional_text, parse_id, parse_price, parse_quantity};
use dukaan_core::{DateWindow, DEFAULT_PAYMENT_METHOD};

use crate::error::ApiResult;
use crate::handlers::{listing_window, WindowQuery};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SaleForm {
    pub inventory_id: String,
    pub quantity_sold: String,
    pub selling_price: String,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// `POST /sales/add`: records a sale and decrements stock atomically.
///
/// Unknown item → 404; more units than on hand → 400 naming the available
/// quantity, with nothing written.
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<SaleForm>,
) -> ApiResult<Json<serde_json::Value>> {
    let inventory_id = parse_id("inventory_id", &form.inventory_id)?;
    let quantity_sold = parse_quantity("quantity_sold", &form.quantity_sold)?;
    let selling_price = parse_price("selling_price", &form.selling_price)?;
    let payment_method =
        optional_text(form.payment_method.as_deref()).unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

    let sale = state
        .db
        .sales()
        .record_sale(inventory_id, quantity_sold, selling_price, &payment_method)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Sale recorded successfully!",
        "sale": sale,
    })))
}

/// `GET /sales?start_date&end_date`: newest first; defaults to today.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let (window, warning) = listing_window(&query, DateWindow::single_day(today));

    let sales = state.db.sales().list(window).await?;
    let (cash_total, other_total) = state.db.sales().method_totals(window).await?;

    Ok(Json(json!({
        "sales": sales,
        "cash_total": cash_total,
        "other_total": other_total,
        "warning": warning,
    })))
}
