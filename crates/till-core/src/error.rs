//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError  - invalid constructor arguments (hard failure,        │
//! │                     nothing is built)                                   │
//! │  PurchaseError    - a product refuses a quantity (soft, recoverable)    │
//! │  FormatError      - an untyped shopping list has the wrong shape        │
//! │  OrderError       - a shopping list is rejected as a whole              │
//! │  CatalogError     - a catalog document cannot be turned into a store    │
//! │  CoreError        - umbrella for callers that do not care which         │
//! │                                                                         │
//! │  Flow: PurchaseError → OrderError → CoreError → CLI message             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. `Display` of a rejection IS the user-facing reason; the CLI prints it
//!    verbatim
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Any error produced by till-core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Invalid arguments given to a constructor.
///
/// Raised before anything is allocated, so a product or promotion is never
/// partially built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Purchase Error
// =============================================================================

/// Why a product cannot sell the requested quantity.
///
/// The messages are shown to the customer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// Zero or negative quantity.
    #[error("impossible quantity given")]
    ImpossibleQuantity,

    /// Product is deactivated (or sold out).
    #[error("product not active")]
    NotActive,

    /// Not enough stock left.
    ///
    /// ## User Workflow
    /// ```text
    /// Order line: 6 × Widget
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Widget", available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// "there are only 5 pieces of Widget. Cannot sell 6"
    /// ```
    #[error("there are only {available} pieces of {name}. Cannot sell {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// More than the per-order cap.
    #[error("{name} is a limited product. Only {max} allowed in one purchase")]
    OrderLimitExceeded { name: String, max: i64 },

    /// The price of the requested quantity does not fit in `Money`.
    #[error("the price of {requested} pieces of {name} is too large to charge")]
    TotalTooLarge { name: String, requested: i64 },
}

// =============================================================================
// Format Error
// =============================================================================

/// An untyped shopping list does not have the `[[product, quantity], ...]` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Shopping list format is wrong. The shopping list is not a list")]
    NotAList,

    #[error("Shopping list format is wrong. List items are not all tuples")]
    NotTuples,

    #[error("Shopping list format is wrong. List items are not all tuples of length 2")]
    WrongLength,

    #[error("Shopping list format is wrong. Products are not all recognized store products")]
    UnknownProduct,
}

// =============================================================================
// Order Error
// =============================================================================

/// Why a shopping list was rejected. Nothing in the store changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Product {name} is not in the store")]
    NotInStore { name: String },

    /// First product that refused its (merged) quantity.
    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    /// Every line fits on its own, but their sum does not.
    #[error("the order total is too large to charge")]
    TotalTooLarge,
}

// =============================================================================
// Catalog Error
// =============================================================================

/// A catalog document could not be turned into a store.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("product {product} refers to unknown promotion {promotion}")]
    UnknownPromotion { product: String, promotion: String },

    #[error("{kind} entry {product} needs a {field} value")]
    MissingField {
        kind: &'static str,
        product: String,
        field: &'static str,
    },

    #[error("promotion {name} is defined twice")]
    DuplicatePromotion { name: String },

    #[error("{context}: {source}")]
    Invalid {
        context: String,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
