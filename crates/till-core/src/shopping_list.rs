//! # Shopping Lists
//!
//! The `(product, quantity)` lines a caller hands to the store.
//!
//! ```text
//! caller ──► [ShoppingLine] ──► Store::validate_shopping_list ──► merge_lines
//!                                                                   │
//!   JSON ──► parse_lines ──────┘                                    ▼
//!   [[1, 100], [2, 200]]                                one line per product
//! ```
//!
//! Typed lines always have the right shape. Lists that arrive as JSON go
//! through [`parse_lines`] first, which is where shape errors are reported.

use serde_json::Value;

use crate::error::FormatError;
use crate::product::ProductHandle;

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingLine {
    pub product: ProductHandle,
    pub quantity: i64,
}

impl ShoppingLine {
    pub fn new(product: &ProductHandle, quantity: i64) -> Self {
        ShoppingLine {
            product: product.clone(),
            quantity,
        }
    }
}

impl From<(ProductHandle, i64)> for ShoppingLine {
    fn from((product, quantity): (ProductHandle, i64)) -> Self {
        ShoppingLine { product, quantity }
    }
}

/// Sums the quantities of lines that point at the same product.
///
/// Products are compared by identity, not by value. The result keeps the
/// order in which each product first appeared.
pub fn merge_lines(lines: &[ShoppingLine]) -> Vec<ShoppingLine> {
    let mut merged: Vec<ShoppingLine> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged.iter_mut().find(|m| m.product.ptr_eq(&line.product)) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(line.clone()),
        }
    }
    merged
}

/// Turns `[[product_number, quantity], ...]` into shopping lines.
///
/// `product_number` is the 1-based position in `products`, the numbering the
/// store listing shows. Checks run per item: it must be an array, of length
/// 2, naming a known product with an integer quantity.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use till_core::product::{Product, ProductHandle};
/// use till_core::shopping_list::parse_lines;
///
/// let products = vec![ProductHandle::new(Product::stocked("Pixel", 500, 3).unwrap())];
/// let lines = parse_lines(&json!([[1, 2]]), &products).unwrap();
/// assert_eq!(lines[0].quantity, 2);
/// assert!(parse_lines(&json!([1, 2]), &products).is_err());
/// ```
pub fn parse_lines(
    value: &Value,
    products: &[ProductHandle],
) -> Result<Vec<ShoppingLine>, FormatError> {
    let items = value.as_array().ok_or(FormatError::NotAList)?;

    items
        .iter()
        .map(|item| {
            let pair = item.as_array().ok_or(FormatError::NotTuples)?;
            let [number, quantity] = pair.as_slice() else {
                return Err(FormatError::WrongLength);
            };

            let product = number
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| products.get(index))
                .ok_or(FormatError::UnknownProduct)?;
            let quantity = quantity.as_i64().ok_or(FormatError::UnknownProduct)?;

            Ok(ShoppingLine::new(product, quantity))
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use serde_json::json;

    fn handles() -> Vec<ProductHandle> {
        vec![
            ProductHandle::new(Product::stocked("MacBook Air M2", 1450, 100).unwrap()),
            ProductHandle::new(Product::unlimited("Windows License", 125).unwrap()),
        ]
    }

    #[test]
    fn test_merge_by_identity() {
        let products = handles();
        let twin = ProductHandle::new(Product::stocked("MacBook Air M2", 1450, 100).unwrap());
        let lines = vec![
            ShoppingLine::new(&products[0], 10),
            ShoppingLine::new(&products[1], 1),
            ShoppingLine::new(&products[0], 5),
            ShoppingLine::new(&twin, 2),
        ];

        let merged = merge_lines(&lines);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].product, products[0]);
        assert_eq!(merged[0].quantity, 15);
        assert_eq!(merged[1].quantity, 1);
        // Equal by value, different product
        assert_eq!(merged[2].product, twin);
        assert_eq!(merged[2].quantity, 2);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_lines(&[]).is_empty());
    }

    #[test]
    fn test_parse_lines() {
        let products = handles();
        let lines = parse_lines(&json!([[1, 100], [2, 3]]), &products).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ShoppingLine::new(&products[0], 100));
        assert_eq!(lines[1], ShoppingLine::new(&products[1], 3));
    }

    #[test]
    fn test_parse_format_errors() {
        let products = handles();
        assert_eq!(
            parse_lines(&json!({"1": 2}), &products),
            Err(FormatError::NotAList)
        );
        assert_eq!(
            parse_lines(&json!([1, 100, 2, 200]), &products),
            Err(FormatError::NotTuples)
        );
        assert_eq!(
            parse_lines(&json!([[1, 100, 5]]), &products),
            Err(FormatError::WrongLength)
        );
        assert_eq!(
            parse_lines(&json!([[3, 1]]), &products),
            Err(FormatError::UnknownProduct)
        );
        assert_eq!(
            parse_lines(&json!([[0, 1]]), &products),
            Err(FormatError::UnknownProduct)
        );
        assert_eq!(
            parse_lines(&json!([[1, "many"]]), &products),
            Err(FormatError::UnknownProduct)
        );
    }

    #[test]
    fn test_format_error_message() {
        let err = parse_lines(&json!([1, 100]), &handles()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Shopping list format is wrong. List items are not all tuples"
        );
    }
}
