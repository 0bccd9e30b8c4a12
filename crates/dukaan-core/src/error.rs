//! # Error Types
//!
//! Validation error types for dukaan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dukaan-core errors (this file)                                        │
//! │  └── ValidationError  - Input validation / coercion failures           │
//! │                                                                         │
//! │  dukaan-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures,                   │
//! │                         insufficient-stock business rule               │
//! │                                                                         │
//! │  server errors (apps/server)                                           │
//! │  └── ApiError         - What the client sees (status + JSON)           │
//! │                                                                         │
//! │  Flow: ValidationError → ApiError → client                             │
//! │        DbError         → ApiError → client                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation failures.
///
/// Raised when a form or JSON field is missing, malformed, or violates a
/// business rule. Every variant names the field so the message can be shown
/// back at the originating form.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field was missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A text field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A numeric field could not be coerced from its string form.
    ///
    /// ## When This Occurs
    /// - `purchase_price=abc` in a form submission
    /// - Non-integer quantity
    #[error("{field} must be a number (got '{value}')")]
    InvalidNumber { field: String, value: String },

    /// A numeric field was negative where only zero-or-positive makes sense.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A field was not one of its allowed values.
    ///
    /// ## When This Occurs
    /// - `transaction_type` other than Withdraw/Transfer
    #[error("{field} must be one of: {allowed}")]
    InvalidChoice { field: String, allowed: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidNumber error for the given field and raw value.
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
