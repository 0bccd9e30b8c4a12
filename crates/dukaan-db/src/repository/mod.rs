//! # Repository Layer
//!
//! One repository per entity, plus a reporting repository for the
//! aggregation queries that span tables.
//!
//! ## Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Handler code                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.inventory().list(search, low_stock)  ← typed methods, no SQL leaks │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InventoryRepository (owns a pool clone)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sqlx runtime queries against SQLite                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod easypaisa;
pub mod expense;
pub mod inventory;
pub mod reports;
pub mod sale;
pub mod user;
