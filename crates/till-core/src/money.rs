//! # Money Module
//!
//! Provides the `Money` type for handling prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  "Second unit half price" on a $5 item, 3 units:                        │
//! │    5 * (3 - 1 / 2) = 12.5      ← a fraction of a price unit             │
//! │                                                                         │
//! │  OUR SOLUTION: Whole price units, explicit rounding                     │
//! │    Every total is an i64 count of price units. Promotions that land     │
//! │    on a fraction round half-up, in exactly one place per promotion.     │
//! │    Products and sums are checked: a total that does not fit in i64      │
//! │    is an error, not a wrapped number.                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price = Money::from_units(1450);
//!
//! let line = price.multiply_quantity(2).unwrap();
//! assert_eq!(line.units(), 2900);
//! assert_eq!(line.to_string(), "$2900");
//!
//! // Totals that do not fit are reported, never wrapped
//! assert!(price.multiply_quantity(i64::MAX).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value counted in whole price units.
///
/// ## Design Decisions
/// - **i64 (signed)**: Arithmetic never has to think about underflow
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: `1450` in JSON, not `{"0": 1450}`
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price ──┬──► quoted_price(qty) ──► Promotion::apply ──► buy()
///                      │
///                      └──► display(): "Price: $1450"
///
/// buy() results ──► checked_add ──► OrderReceipt.total ──► "Total payment: $142260"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole price units.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_units(250);
    /// assert_eq!(price.units(), 250);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole price units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity. `None` when the product does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_units(10);
    /// assert_eq!(unit_price.multiply_quantity(3).unwrap().units(), 30);
    /// assert!(unit_price.multiply_quantity(i64::MAX).is_none());
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Adds two amounts. `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(units) => Some(Money(units)),
            None => None,
        }
    }

    /// Narrows an `i128` intermediate result back to `Money`.
    ///
    /// Promotion math runs in `i128`; this is the single place where the
    /// result is checked against the `i64` range.
    #[inline]
    pub fn from_wide(units: i128) -> Option<Money> {
        i64::try_from(units).ok().map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$1450`, the format used by product listings and receipts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}", sign, self.0.unsigned_abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(1450);
        assert_eq!(money.units(), 1450);
        assert!(!money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_units(1450)), "$1450");
        assert_eq!(format!("{}", Money::from_units(0)), "$0");
        assert_eq!(format!("{}", Money::from_units(-5)), "-$5");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!(a.checked_add(b), Some(Money::from_units(1500)));
        assert_eq!(a.multiply_quantity(3), Some(Money::from_units(3000)));
        assert_eq!(a.multiply_quantity(0), Some(Money::zero()));
    }

    #[test]
    fn test_overflow_is_reported() {
        let max = Money::from_units(i64::MAX);
        assert_eq!(max.checked_add(Money::from_units(1)), None);
        assert_eq!(Money::from_units(125).multiply_quantity(i64::MAX / 100), None);
        assert_eq!(max.multiply_quantity(1), Some(max));
    }

    #[test]
    fn test_from_wide() {
        assert_eq!(Money::from_wide(42), Some(Money::from_units(42)));
        assert_eq!(Money::from_wide(i64::MAX as i128), Some(Money::from_units(i64::MAX)));
        assert_eq!(Money::from_wide(i64::MAX as i128 + 1), None);
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&Money::from_units(42)).unwrap();
        assert_eq!(json, "42");
        let back: Money = serde_json::from_str("42").unwrap();
        assert_eq!(back, Money::from_units(42));
    }
}
