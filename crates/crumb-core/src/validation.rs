//! # Validation Module
//!
//! Input validation utilities for Crumb POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Page Frontend                                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger mutation (Rust)                                       │
//! │  └── THIS MODULE: runs before any state change, so a rejected          │
//! │      input leaves the ledger exactly as it was                         │
//! │                                                                         │
//! │  The remote backend validates independently; its rejections arrive     │
//! │  as application failures and never mutate local state (crumb-sync).    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::SaleLine;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
///
/// ## Example
/// ```rust
/// use crumb_core::validation::validate_name;
///
/// assert!(validate_name("name", "Sourdough Loaf").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a numeric field is not negative.
///
/// Used for prices, stock levels, ingredient quantities, expense amounts
/// and the low-stock threshold.
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Sale Validators
// =============================================================================

/// Validates a cart before it becomes a sale.
///
/// ## Rules
/// - At least one line
/// - Every line quantity ≥ 1
/// - No negative line prices
pub fn validate_sale_lines(lines: &[SaleLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::EmptySale);
    }

    for line in lines {
        if line.qty < 1 {
            return Err(ValidationError::InvalidQuantity { qty: line.qty });
        }
        validate_non_negative("price", line.price_cents)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i64, price_cents: i64) -> SaleLine {
        SaleLine {
            product_id: "p1".to_string(),
            name: "Croissant".to_string(),
            price_cents,
            qty,
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Croissant").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("price", 0).is_ok());
        assert!(validate_non_negative("price", 250).is_ok());
        assert!(validate_non_negative("price", -1).is_err());
    }

    #[test]
    fn test_validate_sale_lines_empty_cart() {
        let err = validate_sale_lines(&[]).unwrap_err();
        assert!(matches!(err, ValidationError::EmptySale));
    }

    #[test]
    fn test_validate_sale_lines_zero_quantity() {
        let err = validate_sale_lines(&[line(0, 250)]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidQuantity { qty: 0 }));
    }

    #[test]
    fn test_validate_sale_lines_ok() {
        assert!(validate_sale_lines(&[line(1, 250), line(4, 500)]).is_ok());
    }
}
