//! # Domain Types
//!
//! Core domain types used throughout Dukaan.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  InventoryItem  │   │      Sale       │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  item_name      │   │  inventory_id   │   │  title          │       │
//! │  │  purchase_price │   │  quantity_sold  │   │  category       │       │
//! │  │  quantity       │   │  selling_price  │   │  amount         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐                        │
//! │  │ EasyPaisaTransaction │   │      User       │                        │
//! │  │  ──────────────────  │   │  ─────────────  │                        │
//! │  │  transaction_type    │   │  username       │                        │
//! │  │  total_amount        │   │  password_hash  │                        │
//! │  │  profit_amount       │   └─────────────────┘                        │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Entities use SQLite rowid integers (`INTEGER PRIMARY KEY AUTOINCREMENT`).
//! Sales reference inventory by id; deleting an item cascades to its sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// User
// =============================================================================

/// An application login. Created once at bootstrap (the default admin),
/// never deleted by the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Row id.
    pub id: i64,

    /// Unique login name (case-sensitive exact match at login).
    pub username: String,

    /// Argon2 salted password hash. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Inventory
// =============================================================================

/// An item held in stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    /// Row id.
    pub id: i64,

    /// Display name shown in listings and receipts.
    pub item_name: String,

    /// Free-form category label, used for grouping in reports.
    pub category: String,

    /// Unit cost at purchase time. Mutable; profit figures are computed
    /// against this *current* value (see [`sale_profit`]).
    pub purchase_price: f64,

    /// Units on hand. Decremented atomically when a sale is recorded.
    pub quantity: i64,

    /// Optional supplier name.
    pub supplier: Option<String>,

    /// When the item was added to inventory.
    pub added_date: DateTime<Utc>,
}

impl InventoryItem {
    /// Total purchase cost of the stock on hand (`purchase_price * quantity`).
    pub fn total_purchase_cost(&self) -> f64 {
        self.purchase_price * self.quantity as f64
    }

    /// Whether the item is at or below the low-stock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= LOW_STOCK_THRESHOLD
    }

    /// Whether the item is completely out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale recorded against an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Row id.
    pub id: i64,

    /// The inventory item this sale drew stock from.
    pub inventory_id: i64,

    /// Units sold. Never exceeds the item's stock at the time of sale.
    pub quantity_sold: i64,

    /// Per-unit selling price at the time of sale.
    pub selling_price: f64,

    /// Payment method label ("Cash" unless the form says otherwise).
    pub payment_method: String,

    /// When the sale was recorded.
    pub sale_date: DateTime<Utc>,
}

impl Sale {
    /// Total amount charged (`selling_price * quantity_sold`).
    pub fn total_selling_price(&self) -> f64 {
        self.selling_price * self.quantity_sold as f64
    }
}

/// Profit for a sale, computed against an explicit unit cost.
///
/// ## Live-Cost Behavior
/// The unit cost is a parameter on purpose: callers pass the referenced
/// item's *current* purchase price, so editing an item's cost later changes
/// historical profit figures. This mirrors the system's documented contract;
/// a cost-at-sale-time snapshot would require a schema change.
pub fn sale_profit(selling_price: f64, unit_cost: f64, quantity_sold: i64) -> f64 {
    (selling_price - unit_cost) * quantity_sold as f64
}

// =============================================================================
// Expense
// =============================================================================

/// A labeled cost with no relationships.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Expense {
    /// Row id.
    pub id: i64,

    /// Short description of the expense.
    pub title: String,

    /// Free-form category label.
    pub category: String,

    /// Amount spent.
    pub amount: f64,

    /// Calendar date the expense applies to (supplied on the form,
    /// not the insertion time).
    pub expense_date: DateTime<Utc>,
}

// =============================================================================
// EasyPaisa
// =============================================================================

/// The kind of mobile-money operation performed for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Withdraw,
    Transfer,
}

impl TransactionType {
    /// The label stored in the database and shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Withdraw => "Withdraw",
            TransactionType::Transfer => "Transfer",
        }
    }

    /// Parses the stored/submitted label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Withdraw" => Some(TransactionType::Withdraw),
            "Transfer" => Some(TransactionType::Transfer),
            _ => None,
        }
    }
}

/// A mobile-money transaction handled for a walk-in client.
///
/// Tracked alongside inventory/sales as a separate revenue stream:
/// the shop keeps `profit_amount` and passes `net_amount` to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EasyPaisaTransaction {
    /// Row id.
    pub id: i64,

    /// "Withdraw" or "Transfer" (validated at creation).
    pub transaction_type: String,

    /// Client the transaction was performed for.
    pub client_name: String,

    /// Client's mobile number.
    pub phone_number: String,

    /// Gross amount moved.
    pub total_amount: f64,

    /// Commission kept by the shop.
    pub profit_amount: f64,

    /// When the transaction was recorded.
    pub transaction_date: DateTime<Utc>,
}

impl EasyPaisaTransaction {
    /// Amount handed over after commission (`total_amount - profit_amount`).
    pub fn net_amount(&self) -> f64 {
        self.total_amount - self.profit_amount
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
