//! # Products
//!
//! The four product shapes a store can carry and the purchase rules they
//! enforce.
//!
//! ## Product Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ProductKind                                      │
//! │                                                                         │
//! │                     stock counter?                                      │
//! │                     no                     yes                          │
//! │              ┌──────────────────────┬──────────────────────┐            │
//! │   per-order  │ Unlimited            │ Stocked              │            │
//! │   cap?   no  │ (licences, services) │ (laptops, earbuds)   │            │
//! │              ├──────────────────────┼──────────────────────┤            │
//! │          yes │ OrderLimitedUnlimited│ OrderLimitedStocked  │            │
//! │              │ (shipping)           │ (rare coffee)        │            │
//! │              └──────────────────────┴──────────────────────┘            │
//! │                                                                         │
//! │  Shared fields (name, price, active, promotion) live in Product;        │
//! │  the kind carries only what differs.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purchase Flow
//! ```text
//! buy(q)
//!   │
//!   ▼
//! precheck_purchase(q) ──► q > 0? ──► active? ──► stock ≥ q? ──► q ≤ cap?
//!   │                                                 (stocked)    (limited)
//!   │ any failure: Err(PurchaseError), nothing changes
//!   ▼
//! charge quoted_price(q) ──► decrement stock ──► deactivate at zero
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{PurchaseError, ValidationError};
use crate::money::Money;
use crate::promotion::SharedPromotion;
use crate::validation::{
    validate_max_per_order, validate_price, validate_product_name, validate_stock_quantity,
};

/// Message shown after a successful `buy`.
pub const PURCHASE_SUCCESS: &str = "Purchase was successful";

// =============================================================================
// Product Kind
// =============================================================================

/// What sets one product shape apart from the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Infinite stock.
    Unlimited,
    /// Finite stock that runs down with every purchase.
    Stocked { quantity: i64 },
    /// Infinite stock, but at most `max_per_order` units per order line.
    OrderLimitedUnlimited { max_per_order: i64 },
    /// Finite stock and a per-order cap.
    OrderLimitedStocked { quantity: i64, max_per_order: i64 },
}

impl ProductKind {
    fn quantity(&self) -> Option<i64> {
        match *self {
            ProductKind::Stocked { quantity }
            | ProductKind::OrderLimitedStocked { quantity, .. } => Some(quantity),
            ProductKind::Unlimited | ProductKind::OrderLimitedUnlimited { .. } => None,
        }
    }

    fn max_per_order(&self) -> Option<i64> {
        match *self {
            ProductKind::OrderLimitedUnlimited { max_per_order }
            | ProductKind::OrderLimitedStocked { max_per_order, .. } => Some(max_per_order),
            ProductKind::Unlimited | ProductKind::Stocked { .. } => None,
        }
    }

    fn quantity_mut(&mut self) -> Option<&mut i64> {
        match self {
            ProductKind::Stocked { quantity }
            | ProductKind::OrderLimitedStocked { quantity, .. } => Some(quantity),
            ProductKind::Unlimited | ProductKind::OrderLimitedUnlimited { .. } => None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the store catalog.
///
/// ## Invariants
/// - `name` is non-empty, `unit_price >= 0`
/// - stock never goes negative; a stocked product that sells out is
///   deactivated and stays inactive until [`Product::activate`] is called
/// - `max_per_order >= 1`
#[derive(Debug, Clone)]
pub struct Product {
    id: Uuid,
    name: String,
    unit_price: Money,
    active: bool,
    promotion: Option<SharedPromotion>,
    kind: ProductKind,
}

impl Product {
    /// A product that never runs out, e.g. a software licence.
    pub fn unlimited(name: impl Into<String>, price: i64) -> Result<Self, ValidationError> {
        Self::build(name.into(), price, ProductKind::Unlimited)
    }

    /// A product with a finite stock. Starts inactive when `quantity` is 0.
    pub fn stocked(
        name: impl Into<String>,
        price: i64,
        quantity: i64,
    ) -> Result<Self, ValidationError> {
        validate_stock_quantity(quantity)?;
        Self::build(name.into(), price, ProductKind::Stocked { quantity })
    }

    /// An unlimited product that may be bought at most `max_per_order` at a time.
    pub fn order_limited(
        name: impl Into<String>,
        price: i64,
        max_per_order: i64,
    ) -> Result<Self, ValidationError> {
        validate_max_per_order(max_per_order)?;
        Self::build(
            name.into(),
            price,
            ProductKind::OrderLimitedUnlimited { max_per_order },
        )
    }

    /// A stocked product that may be bought at most `max_per_order` at a time.
    pub fn order_limited_stocked(
        name: impl Into<String>,
        price: i64,
        quantity: i64,
        max_per_order: i64,
    ) -> Result<Self, ValidationError> {
        validate_stock_quantity(quantity)?;
        validate_max_per_order(max_per_order)?;
        Self::build(
            name.into(),
            price,
            ProductKind::OrderLimitedStocked {
                quantity,
                max_per_order,
            },
        )
    }

    fn build(name: String, price: i64, kind: ProductKind) -> Result<Self, ValidationError> {
        validate_product_name(&name)?;
        validate_price(price)?;

        let active = kind.quantity().map_or(true, |quantity| quantity > 0);
        Ok(Product {
            id: Uuid::new_v4(),
            name,
            unit_price: Money::from_units(price),
            active,
            promotion: None,
            kind,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Identifier used to correlate log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current unit price, before any promotion.
    pub fn get_price(&self) -> Money {
        self.unit_price
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Units in stock, `None` for unlimited products.
    pub fn quantity(&self) -> Option<i64> {
        self.kind.quantity()
    }

    /// Per-order cap, `None` when there is none.
    pub fn max_per_order(&self) -> Option<i64> {
        self.kind.max_per_order()
    }

    /// Whether the product keeps a stock counter.
    pub fn is_stocked(&self) -> bool {
        self.kind.quantity().is_some()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Makes the product purchasable again. Stock is not restored.
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    // -------------------------------------------------------------------------
    // Promotion
    // -------------------------------------------------------------------------

    pub fn promotion(&self) -> Option<&SharedPromotion> {
        self.promotion.as_ref()
    }

    /// Attaches `promotion`, replacing any previous one.
    pub fn set_promotion(&mut self, promotion: SharedPromotion) {
        self.promotion = Some(promotion);
    }

    pub fn remove_promotion(&mut self) {
        self.promotion = None;
    }

    // -------------------------------------------------------------------------
    // Pricing & Purchase
    // -------------------------------------------------------------------------

    /// Display name and the price of `quantity` units, promotion included.
    ///
    /// Neither stock nor the active flag is looked at. Fails only when the
    /// price does not fit in [`Money`].
    ///
    /// ## Example
    /// ```rust
    /// use till_core::product::Product;
    ///
    /// let product = Product::stocked("Name", 1, 2).unwrap();
    /// let (name, price) = product.quoted_price(100).unwrap();
    /// assert_eq!((name, price.units()), ("Name", 100));
    /// ```
    pub fn quoted_price(&self, quantity: i64) -> Result<(&str, Money), PurchaseError> {
        let total = match &self.promotion {
            Some(promotion) => promotion.apply(self.unit_price, quantity),
            None => self.unit_price.multiply_quantity(quantity),
        };
        total
            .map(|total| (self.name.as_str(), total))
            .ok_or_else(|| PurchaseError::TotalTooLarge {
                name: self.name.clone(),
                requested: quantity,
            })
    }

    /// Checks that `quantity` units could be bought right now. Mutates nothing.
    ///
    /// Checks run in order: positive quantity, active, stock, per-order cap,
    /// and finally that the price fits in [`Money`]. The first failing check
    /// is reported.
    pub fn precheck_purchase(&self, quantity: i64) -> Result<(), PurchaseError> {
        if quantity <= 0 {
            return Err(PurchaseError::ImpossibleQuantity);
        }
        if !self.active {
            return Err(PurchaseError::NotActive);
        }
        if let Some(available) = self.kind.quantity() {
            check_stock(&self.name, available, quantity)?;
        }
        if let Some(max) = self.kind.max_per_order() {
            check_order_limit(&self.name, max, quantity)?;
        }
        self.quoted_price(quantity)?;
        Ok(())
    }

    /// Buys `quantity` units and returns the charged price.
    ///
    /// On rejection the product is left untouched.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::product::Product;
    ///
    /// let mut widget = Product::stocked("Widget", 10, 5).unwrap();
    /// assert_eq!(widget.buy(5).unwrap().units(), 50);
    /// assert!(!widget.is_active());
    /// ```
    pub fn buy(&mut self, quantity: i64) -> Result<Money, PurchaseError> {
        if let Err(reason) = self.precheck_purchase(quantity) {
            debug!(product_id = %self.id, name = %self.name, quantity, %reason, "Purchase rejected");
            return Err(reason);
        }

        let (_, charged) = self.quoted_price(quantity)?;

        if let Some(stock) = self.kind.quantity_mut() {
            *stock -= quantity;
            if *stock == 0 {
                self.active = false;
            }
        }

        debug!(
            product_id = %self.id,
            name = %self.name,
            quantity,
            charged = charged.units(),
            remaining = ?self.kind.quantity(),
            "Purchase completed"
        );
        Ok(charged)
    }

    /// Adds stock when an equal product is merged into the catalog.
    ///
    /// Leaves the stock untouched if the sum does not fit.
    pub(crate) fn absorb_stock(&mut self, extra: i64) -> Result<(), ValidationError> {
        if let Some(stock) = self.kind.quantity_mut() {
            *stock = stock
                .checked_add(extra)
                .ok_or_else(|| ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 0,
                    max: i64::MAX,
                })?;
        }
        Ok(())
    }

    /// An independent copy under a fresh id. The promotion stays shared.
    pub(crate) fn detached_copy(&self) -> Product {
        Product {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// One-line summary used by product listings.
    ///
    /// `{name}, Price: ${price}, Quantity: {quantity|Unlimited}[, Limited to {max} per order!], Promotion: {promo|None}`
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Price: {}, Quantity: ", self.name, self.unit_price)?;
        match self.kind.quantity() {
            Some(quantity) => write!(f, "{quantity}")?,
            None => f.write_str("Unlimited")?,
        }
        if let Some(max) = self.kind.max_per_order() {
            write!(f, ", Limited to {max} per order!")?;
        }
        match &self.promotion {
            Some(promotion) => write!(f, ", Promotion: {}", promotion.name()),
            None => f.write_str(", Promotion: None"),
        }
    }
}

fn check_stock(name: &str, available: i64, requested: i64) -> Result<(), PurchaseError> {
    if requested > available {
        return Err(PurchaseError::InsufficientStock {
            name: name.to_string(),
            available,
            requested,
        });
    }
    Ok(())
}

fn check_order_limit(name: &str, max: i64, requested: i64) -> Result<(), PurchaseError> {
    if requested > max {
        return Err(PurchaseError::OrderLimitExceeded {
            name: name.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Product Handle
// =============================================================================

/// Shared reference to a catalog product.
///
/// Shopping lists and the store hold handles to the same product; equality
/// is identity, so two products with identical fields are still different
/// handles.
#[derive(Debug, Clone)]
pub struct ProductHandle(Rc<RefCell<Product>>);

impl ProductHandle {
    pub fn new(product: Product) -> Self {
        ProductHandle(Rc::new(RefCell::new(product)))
    }

    pub fn borrow(&self) -> Ref<'_, Product> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Product> {
        self.0.borrow_mut()
    }

    /// True when both handles point at the same product.
    pub fn ptr_eq(&self, other: &ProductHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Product> for ProductHandle {
    fn from(product: Product) -> Self {
        ProductHandle::new(product)
    }
}

impl PartialEq for ProductHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ProductHandle {}

// =============================================================================
// Unit Tests
// =============================================================================
