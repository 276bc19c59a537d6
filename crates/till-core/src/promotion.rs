//! # Promotions
//!
//! Pricing strategies that turn a unit price and a quantity into the total
//! charged for that quantity.
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │  PromotionKind       │  total(unit_price, q)                            │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │  SecondUnitHalfPrice │  unit_price × (q − ⌊q/2⌋ / 2)   (half-up)        │
//! │  EveryThirdUnitFree  │  unit_price × (q − ⌊q/3⌋)                        │
//! │  PercentOff(p)       │  unit_price × q × (1 − p/100)   (half-up)        │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! A [`Promotion`] carries no mutable state, so one instance is shared by
//! every product it decorates through [`SharedPromotion`].

use std::fmt;
use std::rc::Rc;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_percent, validate_product_name};

/// A promotion shared between any number of products.
pub type SharedPromotion = Rc<Promotion>;

/// The pricing rule of a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionKind {
    /// Every second unit costs half.
    SecondUnitHalfPrice,
    /// Every third unit is free.
    EveryThirdUnitFree,
    /// Flat percentage off the whole line. Always within 0..=100.
    PercentOff(u8),
}

/// A named pricing rule, e.g. "Second Half price!".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    name: String,
    kind: PromotionKind,
}

impl Promotion {
    /// Creates a "second unit half price" promotion.
    pub fn second_unit_half_price(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(name, PromotionKind::SecondUnitHalfPrice)
    }

    /// Creates an "every third unit free" promotion.
    pub fn every_third_unit_free(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(name, PromotionKind::EveryThirdUnitFree)
    }

    /// Creates a percentage discount. `percent` must be within 0..=100.
    pub fn percent_off(name: impl Into<String>, percent: i64) -> Result<Self, ValidationError> {
        let percent = validate_percent(percent)?;
        Self::new(name, PromotionKind::PercentOff(percent))
    }

    /// Creates a promotion of the given kind. Percentages above 100 are rejected.
    pub fn new(name: impl Into<String>, kind: PromotionKind) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_product_name(&name)?;
        if let PromotionKind::PercentOff(percent) = kind {
            validate_percent(i64::from(percent))?;
        }
        Ok(Promotion { name, kind })
    }

    /// Wraps the promotion so it can be attached to several products.
    pub fn shared(self) -> SharedPromotion {
        Rc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PromotionKind {
        self.kind
    }

    /// Total charged for `quantity` units at `unit_price`.
    ///
    /// Never more than `unit_price * quantity` and never less for a larger
    /// quantity. Non-positive quantities cost nothing. `None` when the total
    /// does not fit in [`Money`].
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::promotion::Promotion;
    ///
    /// let promo = Promotion::second_unit_half_price("Second Half price!").unwrap();
    /// assert_eq!(promo.apply(Money::from_units(10), 2).unwrap().units(), 15);
    /// assert!(promo.apply(Money::from_units(10), i64::MAX).is_none());
    /// ```
    pub fn apply(&self, unit_price: Money, quantity: i64) -> Option<Money> {
        if quantity <= 0 {
            return Some(Money::zero());
        }

        // i128 so the intermediate products of two i64 values fit
        let price = i128::from(unit_price.units());
        let q = i128::from(quantity);

        let total = match self.kind {
            // ⌈unit_price × (2q − ⌊q/2⌋) / 2⌉
            PromotionKind::SecondUnitHalfPrice => {
                price.checked_mul(2 * q - q / 2)?.checked_add(1)?.div_euclid(2)
            }
            PromotionKind::EveryThirdUnitFree => price.checked_mul(q - q / 3)?,
            PromotionKind::PercentOff(percent) => {
                let list = price.checked_mul(q)?;
                let discount = (list.checked_mul(i128::from(percent))? + 50) / 100;
                list - discount
            }
        };

        Money::from_wide(total)
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
