//! # dukaan-core: Pure Business Logic for Dukaan
//!
//! This crate is the **heart** of Dukaan, a small-business management server.
//! It contains all business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dukaan Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP Server (axum)                           │   │
//! │  │    login ──► inventory ──► sales ──► reports                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dukaan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │ validation│  │ reporting │                  │   │
//! │  │   │ Inventory │  │  coercion │  │DateWindow │                  │   │
//! │  │   │   Sale    │  │   rules   │  │ MonthSpan │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    dukaan-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, Sale, Expense, EasyPaisaTransaction)
//! - [`error`] - Validation error types
//! - [`validation`] - Form-field coercion and business rule validation
//! - [`reporting`] - Date windows and calendar-month arithmetic for reports
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Explicit Cost**: Sale profit takes the item's unit cost as a parameter,
//!    so "profit is computed against the current purchase price" is visible at
//!    every call site rather than hidden in a lazy lookup

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod reporting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dukaan_core::InventoryItem` instead of
// `use dukaan_core::types::InventoryItem`

pub use error::ValidationError;
pub use reporting::{DateWindow, MalformedDate, MonthSpan};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity at or below which an inventory item counts as low stock.
///
/// ## Business Reason
/// A fixed reorder threshold for a single-shop deployment. Could become
/// per-item configuration in a later version.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Payment method recorded when a sale form leaves the field blank.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";
