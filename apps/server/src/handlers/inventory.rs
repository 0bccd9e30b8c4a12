//! Inventory handlers: browser-form CRUD plus the JSON `/api` pair used by
//! the point-of-sale screen.

use std::borrow::Cow;

use axum::extract::{Path, Query, State};
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::json;

use dukaan_core::validation::{optional_text, parse_price, parse_quantity, validate_text};
use dukaan_core::{InventoryItem, ValidationError};

use crate::error::ApiResult;
use crate::AppState;

// Field length limits carried over from the source schema.
const NAME_MAX: usize = 100;
const CATEGORY_MAX: usize = 50;
const SUPPLIER_MAX: usize = 100;

/// A numeric field as submitted by a client.
///
/// Browser forms always send text; JSON clients send real numbers or text.
/// Both shapes funnel through the same coercion rules in [`validate_item`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    fn raw(&self) -> Cow<'_, str> {
        match self {
            NumericField::Number(n) => Cow::Owned(n.to_string()),
            NumericField::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// Incoming item fields. Numeric fields stay unparsed until coercion.
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    pub item_name: String,
    pub category: String,
    pub purchase_price: NumericField,
    pub quantity: NumericField,
    #[serde(default)]
    pub supplier: Option<String>,
}

struct ValidatedItem {
    item_name: String,
    category: String,
    purchase_price: f64,
    quantity: i64,
    supplier: Option<String>,
}

fn validate_item(form: &ItemForm) -> Result<ValidatedItem, ValidationError> {
    Ok(ValidatedItem {
        item_name: validate_text("item_name", &form.item_name, NAME_MAX)?.to_string(),
        category: validate_text("category", &form.category, CATEGORY_MAX)?.to_string(),
        purchase_price: parse_price("purchase_price", &form.purchase_price.raw())?,
        quantity: parse_quantity("quantity", &form.quantity.raw())?,
        supplier: match optional_text(form.supplier.as_deref()) {
            Some(supplier) => Some(validate_text("supplier", &supplier, SUPPLIER_MAX)?.to_string()),
            None => None,
        },
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub search: Option<String>,
    pub low_stock: Option<String>,
}

/// `GET /inventory?search=&low_stock=`: all items, newest-added first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let low_stock_only = matches!(query.low_stock.as_deref(), Some("1") | Some("true"));

    let items = state
        .db
        .inventory()
        .list(query.search.as_deref(), low_stock_only)
        .await?;

    Ok(Json(json!({
        "items": items,
        "count": items.len(),
    })))
}

/// `POST /inventory/add`: form-encoded item creation.
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> ApiResult<Json<serde_json::Value>> {
    let item = insert_item(&state, &form).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Item added successfully!",
        "item": item,
    })))
}

/// `POST /inventory/edit/:id`: overwrites all mutable fields.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ItemForm>,
) -> ApiResult<Json<serde_json::Value>> {
    let fields = validate_item(&form)?;

    state
        .db
        .inventory()
        .update(
            id,
            &fields.item_name,
            &fields.category,
            fields.purchase_price,
            fields.quantity,
            fields.supplier.as_deref(),
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Item updated successfully!",
    })))
}

/// `GET /inventory/delete/:id`: deletes the item; its sales cascade away.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.db.inventory().delete(id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Item deleted successfully!",
    })))
}

/// `POST /api/inventory/add`: JSON twin of the form route, also accepting
/// real JSON numbers for the numeric fields.
pub async fn api_add(
    State(state): State<AppState>,
    Json(form): Json<ItemForm>,
) -> ApiResult<Json<serde_json::Value>> {
    let item = insert_item(&state, &form).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Item added successfully!",
        "item": item,
    })))
}

/// `GET /api/inventory/search?q=`: point-of-sale lookup, name substring
/// match, in-stock items only. An empty or missing `q` matches every
/// in-stock item (the "show everything" case on the sale screen).
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn api_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<InventoryItem>>> {
    let q = query.q.as_deref().map(str::trim).unwrap_or("");

    let items = state.db.inventory().search_in_stock(q).await?;
    Ok(Json(items))
}

async fn insert_item(state: &AppState, form: &ItemForm) -> ApiResult<InventoryItem> {
    let fields = validate_item(form)?;

    let item = state
        .db
        .inventory()
        .insert(
            &fields.item_name,
            &fields.category,
            fields.purchase_price,
            fields.quantity,
            fields.supplier.as_deref(),
        )
        .await?;

    Ok(item)
}
