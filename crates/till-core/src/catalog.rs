//! # Catalog Documents
//!
//! Builds a [`Store`] from a JSON description. Reading the file is the
//! caller's job; this module only sees the text.
//!
//! ## Document Shape
//! ```json
//! {
//!   "promotions": [
//!     { "name": "30% off!", "kind": "percent_off", "percent": 30 }
//!   ],
//!   "products": [
//!     { "kind": "stocked", "name": "Google Pixel 7", "price": 500, "quantity": 250 },
//!     { "kind": "unlimited", "name": "Windows License", "price": 125, "promotion": "30% off!" },
//!     { "kind": "order_limited", "name": "Shipping", "price": 10, "max_per_order": 1 }
//!   ]
//! }
//! ```
//!
//! Products naming the same promotion share one instance of it. Products
//! are added through [`Store::add_product`], so equal entries merge.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{CatalogError, ValidationError};
use crate::product::Product;
use crate::promotion::{Promotion, SharedPromotion};
use crate::store::Store;

/// The catalog the CLI opens with when no document is configured.
pub const DEFAULT_CATALOG: &str = r#"{
  "promotions": [
    { "name": "Second Half price!", "kind": "second_unit_half_price" },
    { "name": "Third One Free!", "kind": "every_third_unit_free" },
    { "name": "30% off!", "kind": "percent_off", "percent": 30 }
  ],
  "products": [
    { "kind": "stocked", "name": "MacBook Air M2", "price": 1450, "quantity": 100,
      "promotion": "Second Half price!" },
    { "kind": "stocked", "name": "Bose QuietComfort Earbuds", "price": 250, "quantity": 500,
      "promotion": "Third One Free!" },
    { "kind": "stocked", "name": "Google Pixel 7", "price": 500, "quantity": 250 },
    { "kind": "unlimited", "name": "Windows License", "price": 125, "promotion": "30% off!" },
    { "kind": "unlimited", "name": "XYZ Service Contract", "price": 400 },
    { "kind": "order_limited", "name": "Shipping", "price": 10, "max_per_order": 1 },
    { "kind": "order_limited_stocked", "name": "Rare coffee", "price": 100, "quantity": 100,
      "max_per_order": 1 }
  ]
}"#;

// =============================================================================
// Document Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(default)]
    pub promotions: Vec<PromotionEntry>,
    pub products: Vec<ProductEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionRule {
    SecondUnitHalfPrice,
    EveryThirdUnitFree,
    PercentOff,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromotionEntry {
    pub name: String,
    pub kind: PromotionRule,
    #[serde(default)]
    pub percent: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductShape {
    Unlimited,
    Stocked,
    OrderLimited,
    OrderLimitedStocked,
}

impl ProductShape {
    fn label(self) -> &'static str {
        match self {
            ProductShape::Unlimited => "unlimited",
            ProductShape::Stocked => "stocked",
            ProductShape::OrderLimited => "order_limited",
            ProductShape::OrderLimitedStocked => "order_limited_stocked",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductEntry {
    pub kind: ProductShape,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub max_per_order: Option<i64>,
    #[serde(default)]
    pub promotion: Option<String>,
}

// =============================================================================
// Building
// =============================================================================

/// Parses a JSON catalog and builds the store it describes.
pub fn parse_catalog(json: &str) -> Result<Store, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    build_store(&document)
}

/// The demo store.
pub fn default_catalog() -> Result<Store, CatalogError> {
    parse_catalog(DEFAULT_CATALOG)
}

/// Builds a store from an already-parsed document.
pub fn build_store(document: &CatalogDocument) -> Result<Store, CatalogError> {
    let mut promotions: HashMap<&str, SharedPromotion> = HashMap::new();
    for entry in &document.promotions {
        let promotion = build_promotion(entry)?;
        if promotions.insert(&entry.name, promotion.shared()).is_some() {
            return Err(CatalogError::DuplicatePromotion {
                name: entry.name.clone(),
            });
        }
    }

    let mut store = Store::default();
    for entry in &document.products {
        let mut product = build_product(entry)?;
        if let Some(name) = &entry.promotion {
            let promotion =
                promotions
                    .get(name.as_str())
                    .ok_or_else(|| CatalogError::UnknownPromotion {
                        product: entry.name.clone(),
                        promotion: name.clone(),
                    })?;
            product.set_promotion(SharedPromotion::clone(promotion));
        }
        store
            .add_product(product)
            .map_err(|source| invalid(format!("product {}", entry.name), source))?;
    }

    Ok(store)
}

fn build_promotion(entry: &PromotionEntry) -> Result<Promotion, CatalogError> {
    let built = match entry.kind {
        PromotionRule::SecondUnitHalfPrice => Promotion::second_unit_half_price(&entry.name),
        PromotionRule::EveryThirdUnitFree => Promotion::every_third_unit_free(&entry.name),
        PromotionRule::PercentOff => {
            let percent = entry.percent.ok_or_else(|| CatalogError::MissingField {
                kind: "percent_off",
                product: entry.name.clone(),
                field: "percent",
            })?;
            Promotion::percent_off(&entry.name, percent)
        }
    };
    built.map_err(|source| invalid(format!("promotion {}", entry.name), source))
}

fn build_product(entry: &ProductEntry) -> Result<Product, CatalogError> {
    let require = |value: Option<i64>, field: &'static str| {
        value.ok_or_else(|| CatalogError::MissingField {
            kind: entry.kind.label(),
            product: entry.name.clone(),
            field,
        })
    };

    let name = entry.name.as_str();
    let built = match entry.kind {
        ProductShape::Unlimited => Product::unlimited(name, entry.price),
        ProductShape::Stocked => {
            Product::stocked(name, entry.price, require(entry.quantity, "quantity")?)
        }
        ProductShape::OrderLimited => Product::order_limited(
            name,
            entry.price,
            require(entry.max_per_order, "max_per_order")?,
        ),
        ProductShape::OrderLimitedStocked => Product::order_limited_stocked(
            name,
            entry.price,
            require(entry.quantity, "quantity")?,
            require(entry.max_per_order, "max_per_order")?,
        ),
    };

    built.map_err(|source| invalid(format!("product {}", entry.name), source))
}

fn invalid(context: String, source: ValidationError) -> CatalogError {
    CatalogError::Invalid { context, source }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopping_list::ShoppingLine;
    use std::rc::Rc;

    #[test]
    fn test_default_catalog_listing() {
        let store = default_catalog().unwrap();
        let all = store.get_all_products();
        assert_eq!(all.len(), 7);
        assert_eq!(
            all[0].borrow().display(),
            "MacBook Air M2, Price: $1450, Quantity: 100, Promotion: Second Half price!"
        );
        assert_eq!(
            all[5].borrow().display(),
            "Shipping, Price: $10, Quantity: Unlimited, Limited to 1 per order!, Promotion: None"
        );
        assert_eq!(
            all[6].borrow().display(),
            "Rare coffee, Price: $100, Quantity: 100, Limited to 1 per order!, Promotion: None"
        );
        assert_eq!(store.get_total_quantity(), 950);
    }

    #[test]
    fn test_default_catalog_order_total() {
        let mut store = default_catalog().unwrap();
        let all = store.get_all_products();
        let order = vec![
            ShoppingLine::new(&all[0], 100),
            ShoppingLine::new(&all[1], 200),
            ShoppingLine::new(&all[5], 1),
        ];
        let receipt = store.order(&order).unwrap();
        assert_eq!(receipt.total.to_string(), "$142260");
    }

    #[test]
    fn test_default_catalog_rejects_second_shipping() {
        let mut store = default_catalog().unwrap();
        let all = store.get_all_products();
        let order = vec![ShoppingLine::new(&all[0], 100), ShoppingLine::new(&all[5], 2)];
        let err = store.order(&order).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Shipping is a limited product. Only 1 allowed in one purchase"
        );
        assert_eq!(all[0].borrow().quantity(), Some(100));
    }

    #[test]
    fn test_promotions_are_shared() {
        let json = r#"{
            "promotions": [{ "name": "Half", "kind": "second_unit_half_price" }],
            "products": [
                { "kind": "unlimited", "name": "A", "price": 10, "promotion": "Half" },
                { "kind": "stocked", "name": "B", "price": 20, "quantity": 3, "promotion": "Half" }
            ]
        }"#;
        let store = parse_catalog(json).unwrap();
        let a = store.products()[0].borrow();
        let b = store.products()[1].borrow();
        assert!(Rc::ptr_eq(a.promotion().unwrap(), b.promotion().unwrap()));
    }

    #[test]
    fn test_duplicate_products_merge() {
        let json = r#"{
            "products": [
                { "kind": "stocked", "name": "A", "price": 10, "quantity": 3 },
                { "kind": "stocked", "name": "A", "price": 10, "quantity": 4 }
            ]
        }"#;
        let store = parse_catalog(json).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_total_quantity(), 7);
    }

    #[test]
    fn test_catalog_errors() {
        let missing = r#"{ "products": [{ "kind": "stocked", "name": "A", "price": 1 }] }"#;
        assert!(matches!(
            parse_catalog(missing),
            Err(CatalogError::MissingField { field: "quantity", .. })
        ));

        let unknown = r#"{ "products": [
            { "kind": "unlimited", "name": "A", "price": 1, "promotion": "Nope" }
        ] }"#;
        assert!(matches!(
            parse_catalog(unknown),
            Err(CatalogError::UnknownPromotion { .. })
        ));

        let negative = r#"{ "products": [{ "kind": "unlimited", "name": "A", "price": -1 }] }"#;
        let err = parse_catalog(negative).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
        assert!(err.to_string().starts_with("product A: price must be between 0"));

        let percent = r#"{
            "promotions": [{ "name": "Too much", "kind": "percent_off", "percent": 120 }],
            "products": []
        }"#;
        assert!(matches!(parse_catalog(percent), Err(CatalogError::Invalid { .. })));

        let no_percent = r#"{
            "promotions": [{ "name": "Sale", "kind": "percent_off" }],
            "products": []
        }"#;
        assert!(matches!(
            parse_catalog(no_percent),
            Err(CatalogError::MissingField { field: "percent", .. })
        ));

        let overflow = r#"{ "products": [
            { "kind": "stocked", "name": "W", "price": 1, "quantity": 9223372036854775807 },
            { "kind": "stocked", "name": "W", "price": 1, "quantity": 1 }
        ] }"#;
        assert!(matches!(parse_catalog(overflow), Err(CatalogError::Invalid { .. })));

        let twice = r#"{
            "promotions": [
                { "name": "Half", "kind": "second_unit_half_price" },
                { "name": "Half", "kind": "every_third_unit_free" }
            ],
            "products": []
        }"#;
        assert!(matches!(
            parse_catalog(twice),
            Err(CatalogError::DuplicatePromotion { .. })
        ));

        assert!(matches!(parse_catalog("not json"), Err(CatalogError::Parse(_))));
        assert!(matches!(
            parse_catalog(r#"{ "products": [{ "kind": "gadget", "name": "A", "price": 1 }] }"#),
            Err(CatalogError::Parse(_))
        ));
    }
}
