//! # till-core: Pure Business Logic for Till
//!
//! Products, promotions and the store that validates and fulfils shopping
//! lists. No I/O happens here; the `till` CLI owns the terminal and files.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till (apps/till-cli)                         │   │
//! │  │    config ──► catalog file ──► menu: list / total / order       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │ promotion │  │   store   │  │  catalog  │  │   │
//! │  │   │  Product  │  │ Promotion │  │   Store   │  │   JSON    │  │   │
//! │  │   │  Handle   │  │  (shared) │  │  orders   │  │  → Store  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TERMINAL • INTEGER MONEY                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - Product variants, purchase checks, shared handles
//! - [`promotion`] - Pricing strategies attached to products
//! - [`shopping_list`] - Shopping lines, merging, JSON list parsing
//! - [`store`] - The store: inventory, validation, all-or-nothing orders
//! - [`catalog`] - Building a store from a JSON document
//! - [`money`] - Whole-unit money type
//! - [`error`] - Domain error types
//! - [`validation`] - Constructor argument checks
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::catalog::default_catalog;
//! use till_core::shopping_list::ShoppingLine;
//!
//! let mut store = default_catalog().unwrap();
//! let all = store.get_all_products();
//!
//! let receipt = store
//!     .order(&[
//!         ShoppingLine::new(&all[0], 100),
//!         ShoppingLine::new(&all[1], 200),
//!         ShoppingLine::new(&all[5], 1),
//!     ])
//!     .unwrap();
//! assert_eq!(receipt.total.units(), 142_260);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod product;
pub mod promotion;
pub mod shopping_list;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{
    CatalogError, CoreError, CoreResult, FormatError, OrderError, PurchaseError, ValidationError,
};
pub use money::Money;
pub use product::{Product, ProductHandle, ProductKind, PURCHASE_SUCCESS};
pub use promotion::{Promotion, PromotionKind, SharedPromotion};
pub use shopping_list::ShoppingLine;
pub use store::{OrderReceipt, ReceiptLine, Store, ORDER_SUCCESS};
