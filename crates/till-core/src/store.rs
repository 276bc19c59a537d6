//! # Store
//!
//! The catalog of products and the order workflow built on top of it.
//!
//! ## Order Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store::order(lines)                               │
//! │                                                                         │
//! │  0. line quantities    every line must ask for at least one unit        │
//! │  1. merge_lines        same product (by identity) → one summed line     │
//! │  2. membership         every product must be in this catalog            │
//! │  3. precheck_purchase  per merged line, first failure wins              │
//! │  4. total              the summed charges must fit in Money             │
//! │         │                                                               │
//! │         ├── any step fails → Err(OrderError), catalog untouched         │
//! │         ▼                                                               │
//! │  5. commit             buy() per merged line, sum the charges           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │     OrderReceipt { lines, total }                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Kinds of Equality
//! - `remove_product`, `contains` and line merging compare products by
//!   identity ([`ProductHandle::ptr_eq`]).
//! - `add_product` compares by value: same name, same quoted unit price and
//!   same stocked/unlimited class means "the same article", and the new
//!   entry is folded into the existing one.
//!
//! ## Concurrency
//! The store is single-threaded (`Rc` handles). Validation and commit run
//! inside one `&mut self` call, so no other order can slip in between.

use std::ops::Add;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{OrderError, PurchaseError, ValidationError};
use crate::money::Money;
use crate::product::{Product, ProductHandle};
use crate::shopping_list::{merge_lines, parse_lines, ShoppingLine};

/// Message shown after a successful `order`.
pub const ORDER_SUCCESS: &str = "Order completed successfully.";

// =============================================================================
// Receipt
// =============================================================================

/// One charged line of a completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub charged: Money,
}

/// Outcome of a successful order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    /// Merged lines in the order their product first appeared.
    pub lines: Vec<ReceiptLine>,
    pub total: Money,
}

// =============================================================================
// Store
// =============================================================================

/// An ordered catalog of products.
///
/// Insertion order is the listing order shown to customers.
#[derive(Debug, Default)]
pub struct Store {
    products: Vec<ProductHandle>,
}

impl Store {
    /// Creates a store holding exactly `products`, in order, without merging.
    pub fn new(products: impl IntoIterator<Item = ProductHandle>) -> Self {
        Store {
            products: products.into_iter().collect(),
        }
    }

    /// Adds a product to the catalog, folding it into an equal entry if one
    /// exists.
    ///
    /// ## Behavior
    /// - Equal stocked entry found: its stock grows by the new product's
    ///   stock and the new product is dropped
    /// - Equal unlimited entry found: the new product is dropped
    /// - Otherwise the product is appended
    ///
    /// Returns the handle that now represents the product in the catalog.
    /// Fails, leaving the catalog unchanged, when the merged stock would not
    /// fit in an `i64`.
    pub fn add_product(
        &mut self,
        new_product: impl Into<ProductHandle>,
    ) -> Result<ProductHandle, ValidationError> {
        let new_product = new_product.into();

        if let Some(existing) = self.products.iter().find(|p| p.ptr_eq(&new_product)) {
            return Ok(existing.clone());
        }

        let equal_entry = {
            let new = new_product.borrow();
            let found = self
                .products
                .iter()
                .find(|old| same_article(&old.borrow(), &new))
                .cloned();
            found
        };

        match equal_entry {
            Some(existing) => {
                let extra = new_product.borrow().quantity();
                if let Some(extra) = extra {
                    existing.borrow_mut().absorb_stock(extra)?;
                }
                debug!(
                    product_id = %existing.borrow().id(),
                    name = %existing.borrow().name(),
                    added_stock = ?extra,
                    "Merged product into existing catalog entry"
                );
                Ok(existing)
            }
            None => {
                debug!(
                    product_id = %new_product.borrow().id(),
                    name = %new_product.borrow().name(),
                    "Added product to catalog"
                );
                self.products.push(new_product.clone());
                Ok(new_product)
            }
        }
    }

    /// Removes `product` (by identity). Returns false if it was not listed.
    pub fn remove_product(&mut self, product: &ProductHandle) -> bool {
        let before = self.products.len();
        self.products.retain(|p| !p.ptr_eq(product));
        let removed = self.products.len() != before;
        if removed {
            debug!(product_id = %product.borrow().id(), "Removed product from catalog");
        }
        removed
    }

    /// Whether `product` itself (not an equal copy) is in the catalog.
    pub fn contains(&self, product: &ProductHandle) -> bool {
        self.products.iter().any(|p| p.ptr_eq(product))
    }

    /// Every catalog entry, active or not.
    pub fn products(&self) -> &[ProductHandle] {
        &self.products
    }

    /// Active products in catalog order.
    pub fn get_all_products(&self) -> Vec<ProductHandle> {
        self.products
            .iter()
            .filter(|p| p.borrow().is_active())
            .cloned()
            .collect()
    }

    /// Units in stock across every stocked entry, active or not. Unlimited
    /// products add nothing. Saturates at `i64::MAX`.
    pub fn get_total_quantity(&self) -> i64 {
        self.products
            .iter()
            .filter_map(|p| p.borrow().quantity())
            .fold(0, i64::saturating_add)
    }

    /// Number of active catalog entries.
    pub fn get_product_type_quantity(&self) -> usize {
        self.products.iter().filter(|p| p.borrow().is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Checks that the store could fulfil `lines` right now. Mutates nothing.
    ///
    /// An empty list is valid. A line asking for zero or fewer units is
    /// refused before lines are merged, so it cannot cancel out another line.
    pub fn validate_shopping_list(&self, lines: &[ShoppingLine]) -> Result<(), OrderError> {
        if lines.iter().any(|line| line.quantity <= 0) {
            return Err(PurchaseError::ImpossibleQuantity.into());
        }

        let mut total = Money::zero();
        for line in merge_lines(lines) {
            let product = line.product.borrow();
            if !self.contains(&line.product) {
                return Err(OrderError::NotInStore {
                    name: product.name().to_string(),
                });
            }
            product.precheck_purchase(line.quantity)?;
            let (_, charged) = product.quoted_price(line.quantity)?;
            total = total.checked_add(charged).ok_or(OrderError::TotalTooLarge)?;
        }
        Ok(())
    }

    /// Parses a JSON shopping list against the current listing numbering
    /// ([`Store::get_all_products`]) and validates it.
    pub fn validate_raw_shopping_list(&self, raw: &Value) -> Result<Vec<ShoppingLine>, OrderError> {
        let lines = parse_lines(raw, &self.get_all_products())?;
        self.validate_shopping_list(&lines)?;
        Ok(lines)
    }

    /// Validates `lines` and, if valid, buys every product and returns the
    /// receipt.
    ///
    /// Lines for the same product are charged as one merged line, so a
    /// promotion sees the combined quantity. On error nothing is bought.
    pub fn order(&mut self, lines: &[ShoppingLine]) -> Result<OrderReceipt, OrderError> {
        if let Err(err) = self.validate_shopping_list(lines) {
            warn!(lines = lines.len(), reason = %err, "Order rejected");
            return Err(err);
        }

        let mut receipt_lines = Vec::new();
        for line in merge_lines(lines) {
            let mut product = line.product.borrow_mut();
            let charged = product.buy(line.quantity)?;
            receipt_lines.push(ReceiptLine {
                product_id: product.id(),
                name: product.name().to_string(),
                quantity: line.quantity,
                charged,
            });
        }

        let total = receipt_lines
            .iter()
            .try_fold(Money::zero(), |sum, line| sum.checked_add(line.charged))
            .ok_or(OrderError::TotalTooLarge)?;
        let receipt = OrderReceipt {
            id: Uuid::new_v4(),
            placed_at: Utc::now(),
            total,
            lines: receipt_lines,
        };
        info!(
            order_id = %receipt.id,
            lines = receipt.lines.len(),
            total = receipt.total.units(),
            "Order completed"
        );
        Ok(receipt)
    }

    /// A new store with the products of `self` followed by those of `other`,
    /// each passed through [`Store::add_product`].
    ///
    /// The new store holds copies: buying from it leaves both sources alone.
    /// Fails when two merged entries hold more stock than fits in an `i64`.
    pub fn combine(&self, other: &Store) -> Result<Store, ValidationError> {
        let mut combined = Store::default();
        for product in self.products.iter().chain(other.products.iter()) {
            let copy = product.borrow().detached_copy();
            combined.add_product(copy)?;
        }
        Ok(combined)
    }
}

impl Add for &Store {
    type Output = Result<Store, ValidationError>;

    fn add(self, other: Self) -> Self::Output {
        self.combine(other)
    }
}

/// Same name, same quoted unit price, same stocked/unlimited class.
fn same_article(a: &Product, b: &Product) -> bool {
    a.is_stocked() == b.is_stocked() && a.quoted_price(1).ok() == b.quoted_price(1).ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
