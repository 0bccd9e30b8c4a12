//! # Validation Module
//!
//! Form-field validation and coercion for Dukaan.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extraction (axum Form / Json)                           │
//! │  ├── Shape validation (missing keys, wrong content type)               │
//! │  └── Numeric fields stay String here - forms submit text               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Coercion ("12.50" → 12.50, "abc" → InvalidNumber)                 │
//! │  └── Business rule validation (required, choice sets)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dukaan_core::validation::{parse_price, parse_quantity, validate_text};
//!
//! let price = parse_price("purchase_price", "12.50").unwrap();
//! let qty = parse_quantity("quantity", "4").unwrap();
//! validate_text("item_name", "Widget", 200).unwrap();
//!
//! assert!(parse_price("purchase_price", "twelve").is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::TransactionType;

// =============================================================================
// Text Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most `max` characters
///
/// Returns the trimmed value on success.
pub fn validate_text<'a>(field: &str, value: &'a str, max: usize) -> ValidationResult<&'a str> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value)
}

/// Normalizes an optional text field: trims, and maps blank to None.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) => {
            let v = v.trim();
            if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        }
        None => None,
    }
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces a monetary form field from its string representation.
///
/// ## Rules
/// - Must parse as f64 ("12", "12.5", "0" all accepted)
/// - Must not be negative
///
/// ## Example
/// ```rust
/// use dukaan_core::validation::parse_price;
///
/// assert_eq!(parse_price("amount", "12.5").unwrap(), 12.5);
/// assert!(parse_price("amount", "abc").is_err());
/// assert!(parse_price("amount", "-1").is_err());
/// ```
pub fn parse_price(field: &str, value: &str) -> ValidationResult<f64> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    let parsed: f64 = value
        .parse()
        .map_err(|_| ValidationError::invalid_number(field, value))?;

    if !parsed.is_finite() {
        return Err(ValidationError::invalid_number(field, value));
    }

    if parsed < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(parsed)
}

/// Coerces an integer quantity form field.
///
/// ## Rules
/// - Must parse as i64
/// - Must not be negative (zero is allowed: an item can be entered as
///   out of stock, and an edit can zero the count)
pub fn parse_quantity(field: &str, value: &str) -> ValidationResult<i64> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    let parsed: i64 = value
        .parse()
        .map_err(|_| ValidationError::invalid_number(field, value))?;

    if parsed < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(parsed)
}

/// Coerces an entity id from a form field ("3" → 3).
pub fn parse_id(field: &str, value: &str) -> ValidationResult<i64> {
    let value = value.trim();

    value
        .parse()
        .map_err(|_| ValidationError::invalid_number(field, value))
}

// =============================================================================
// Choice Validators
// =============================================================================

/// Validates an EasyPaisa transaction type label.
pub fn validate_transaction_type(value: &str) -> ValidationResult<TransactionType> {
    TransactionType::parse(value.trim()).ok_or(ValidationError::InvalidChoice {
        field: "transaction_type".to_string(),
        allowed: "Withdraw, Transfer".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text("item_name", " Widget ", 200).unwrap(), "Widget");
        assert!(validate_text("item_name", "", 200).is_err());
        assert!(validate_text("item_name", "   ", 200).is_err());
        assert!(validate_text("item_name", &"A".repeat(300), 200).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some(" ACME ")), Some("ACME".to_string()));
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("purchase_price", "10").unwrap(), 10.0);
        assert_eq!(parse_price("purchase_price", "12.75").unwrap(), 12.75);
        assert_eq!(parse_price("purchase_price", "0").unwrap(), 0.0);

        assert!(parse_price("purchase_price", "").is_err());
        assert!(parse_price("purchase_price", "abc").is_err());
        assert!(parse_price("purchase_price", "-5").is_err());
        assert!(parse_price("purchase_price", "NaN").is_err());
        assert!(parse_price("purchase_price", "inf").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("quantity", "5").unwrap(), 5);
        assert_eq!(parse_quantity("quantity", "0").unwrap(), 0);

        assert!(parse_quantity("quantity", "5.5").is_err());
        assert!(parse_quantity("quantity", "-1").is_err());
        assert!(parse_quantity("quantity", "many").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("inventory_id", "42").unwrap(), 42);
        assert!(parse_id("inventory_id", "x").is_err());
    }

    #[test]
    fn test_validate_transaction_type() {
        assert_eq!(
            validate_transaction_type("Withdraw").unwrap(),
            TransactionType::Withdraw
        );
        assert_eq!(
            validate_transaction_type(" Transfer ").unwrap(),
            TransactionType::Transfer
        );
        assert!(validate_transaction_type("Deposit").is_err());
    }
}
