//! # Validation Module
//!
//! Constructor argument checks for products and promotions.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / catalog document                                        │
//! │  ├── Number parsing, bounds on menu choices                             │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Constructors (THIS MODULE)                                    │
//! │  ├── name, price, quantity, cap, percent                                │
//! │  └── ValidationError, nothing half-built                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Purchase prechecks (product module)                           │
//! │  └── quantity vs. stock, cap, active flag → PurchaseError               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_product_name, validate_max_per_order};
//!
//! assert!(validate_product_name("MacBook Air M2").is_ok());
//! assert!(validate_max_per_order(0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest percentage a `PercentOff` promotion may take off.
pub const MAX_DISCOUNT_PERCENT: i64 = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or promotion name.
///
/// ## Rules
/// - Must not be empty
/// - Whitespace-only names count as empty
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_price;
///
/// assert!(validate_price(1450).is_ok());
/// assert!(validate_price(0).is_ok());
/// assert!(validate_price(-1).is_err());
/// ```
pub fn validate_price(units: i64) -> ValidationResult<()> {
    non_negative("price", units)
}

/// Validates a stock quantity. Zero is a valid (sold out) stock level.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    non_negative("quantity", quantity)
}

/// Validates a per-order cap.
///
/// ## Rules
/// - Must be at least 1; a cap of 0 would make the product unsellable
pub fn validate_max_per_order(max: i64) -> ValidationResult<()> {
    if max < 1 {
        return Err(ValidationError::MustBePositive {
            field: "max_per_order".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage and narrows it for storage.
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_percent;
///
/// assert_eq!(validate_percent(30).unwrap(), 30u8);
/// assert!(validate_percent(101).is_err());
/// ```
pub fn validate_percent(percent: i64) -> ValidationResult<u8> {
    u8::try_from(percent)
        .ok()
        .filter(|p| i64::from(*p) <= MAX_DISCOUNT_PERCENT)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 0,
            max: MAX_DISCOUNT_PERCENT,
        })
}

fn non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Google Pixel 7").is_ok());
        assert_eq!(
            validate_product_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(1450).is_ok());
        assert!(validate_price(-1).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(100).is_ok());
        assert!(validate_stock_quantity(-11).is_err());
    }

    #[test]
    fn test_validate_max_per_order() {
        assert!(validate_max_per_order(1).is_ok());
        assert!(validate_max_per_order(0).is_err());
        assert!(validate_max_per_order(-3).is_err());
    }

    #[test]
    fn test_validate_percent() {
        assert_eq!(validate_percent(0), Ok(0));
        assert_eq!(validate_percent(100), Ok(100));
        assert!(validate_percent(-1).is_err());
        assert!(validate_percent(101).is_err());
        assert!(validate_percent(1_000).is_err());
    }
}
