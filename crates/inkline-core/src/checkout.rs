//! # Checkout Quoting
//!
//! Builds priced order lines from cart state.
//!
//! ## Catalog Line Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart row: product, selections, quantity, [width × height unit]         │
//! │       │                                                                 │
//! │       ├──► units::area_of ────────────► size (sqft per piece)           │
//! │       │                                                                 │
//! │       ├──► variant::resolve_variant ──► variant (or none)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pricing::price_line ─────────────────► LinePrice                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderLineItem { price: line_total, size, width_inch, height_inch }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Once created, a line is immutable; editing an order means quoting a new
//! line and replacing the old one.

use tracing::debug;

use crate::config::PricingRules;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{price_line, LinePrice};
use crate::types::{Dimensions, LineSource, OrderLineItem, PricingType, Product};
use crate::units::{area_of, to_inches};
use crate::validation::{validate_money_non_negative, validate_quantity};
use crate::variant::{resolve_variant, Selections};

/// A priced catalog line together with its pricing breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct LineQuote {
    pub item: OrderLineItem,
    pub breakdown: LinePrice,
}

/// Quotes a catalog product line.
///
/// `dimensions` are required for square-feet products. For flat products
/// they are optional and only recorded on the line.
pub fn quote_catalog_line(
    line_id: impl Into<String>,
    product: &Product,
    selections: &Selections,
    quantity: u32,
    dimensions: Option<&Dimensions>,
    rules: &PricingRules,
) -> CoreResult<LineQuote> {
    let size = match (product.pricing_type, dimensions) {
        (PricingType::SquareFeet, Some(dims)) => Some(area_of(dims, rules.fraction_digits)?),
        (PricingType::SquareFeet, None) => {
            return Err(CoreError::InvalidDimension {
                field: "dimensions".to_string(),
                value: "none".to_string(),
            })
        }
        (PricingType::Flat, Some(dims)) => {
            // Validated even though flat pricing ignores the area.
            area_of(dims, rules.fraction_digits)?;
            None
        }
        (PricingType::Flat, None) => None,
    };

    let matched = resolve_variant(product, selections, rules.ambiguous_variant_policy)?;
    let variant = matched.variant();
    let breakdown = price_line(product, variant, quantity, size, rules)?;

    let (width_inch, height_inch) = dimensions
        .map(to_inches)
        .map_or((None, None), |(w, h)| (Some(w), Some(h)));

    let item = OrderLineItem {
        id: line_id.into(),
        source: LineSource::Catalog {
            product_id: product.id.clone(),
            variant_id: variant.map(|v| v.id.clone()),
        },
        quantity,
        size,
        width_inch,
        height_inch,
        price: breakdown.line_total,
    };

    debug!(
        line_id = %item.id,
        product_id = %product.id,
        price = %item.price,
        "Quoted catalog line"
    );
    Ok(LineQuote { item, breakdown })
}

/// Builds a line for an unlisted (ad hoc) product priced by hand.
///
/// `total` is the whole line's price as entered at the counter.
pub fn unlisted_line(
    line_id: impl Into<String>,
    name: &str,
    quantity: u32,
    total: Money,
    dimensions: Option<&Dimensions>,
    rules: &PricingRules,
) -> CoreResult<OrderLineItem> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        }
        .into());
    }
    validate_quantity(quantity)?;
    validate_money_non_negative("line price", total)?;

    let (size, width_inch, height_inch) = match dimensions {
        Some(dims) => {
            let area = area_of(dims, rules.fraction_digits)?;
            let (w, h) = to_inches(dims);
            (Some(area), Some(w), Some(h))
        }
        None => (None, None, None),
    };

    Ok(OrderLineItem {
        id: line_id.into(),
        source: LineSource::Unlisted {
            name: name.trim().to_string(),
        },
        quantity,
        size,
        width_inch,
        height_inch,
        price: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DimensionUnit, Percentage, Variant, VariantDetail, Variation, VariationItem};
    use crate::variant::Selection;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn banner() -> Product {
        Product {
            id: "banner".to_string(),
            name: "Banner".to_string(),
            base_price: Money::from_major(40),
            pricing_type: PricingType::SquareFeet,
            min_order_quantity: 1,
            discount_start: None,
            discount_end: None,
            discount_percentage: None,
            variations: vec![Variation {
                id: "material".to_string(),
                name: "Material".to_string(),
                unit: "gsm".to_string(),
                variation_items: vec![
                    VariationItem {
                        id: "m280".to_string(),
                        value: "280".to_string(),
                    },
                    VariationItem {
                        id: "m440".to_string(),
                        value: "440".to_string(),
                    },
                ],
            }],
            variants: vec![
                Variant {
                    id: "b280".to_string(),
                    additional_price: Money::zero(),
                    variant_details: vec![VariantDetail {
                        variation_item_id: "m280".to_string(),
                    }],
                },
                Variant {
                    id: "b440".to_string(),
                    additional_price: Money::from_major(10),
                    variant_details: vec![VariantDetail {
                        variation_item_id: "m440".to_string(),
                    }],
                },
            ],
        }
    }

    fn pick(item: &str) -> Selections {
        HashMap::from([("Material".to_string(), Selection::new(item, "gsm"))])
    }

    #[test]
    fn test_quote_square_feet_line() {
        let dims = Dimensions {
            width: d("24"),
            height: d("36"),
            unit: DimensionUnit::Inches,
        };
        let quote = quote_catalog_line(
            "l1",
            &banner(),
            &pick("m440"),
            2,
            Some(&dims),
            &PricingRules::default(),
        )
        .unwrap();

        // (40 + 10) × 6 sqft = 300 per piece; × 2 = 600 → +250 design charge
        assert_eq!(quote.breakdown.raw_total, Money::from_major(300));
        assert_eq!(quote.item.price, Money::from_major(850));
        assert_eq!(quote.item.size, Some(d("6")));
        assert_eq!(quote.item.width_inch, Some(d("24")));
        assert_eq!(
            quote.item.source,
            LineSource::Catalog {
                product_id: "banner".to_string(),
                variant_id: Some("b440".to_string()),
            }
        );
    }

    #[test]
    fn test_quote_records_feet_as_inches() {
        let dims = Dimensions {
            width: d("2"),
            height: d("3"),
            unit: DimensionUnit::Feet,
        };
        let quote = quote_catalog_line(
            "l1",
            &banner(),
            &pick("m280"),
            1,
            Some(&dims),
            &PricingRules::default(),
        )
        .unwrap();
        assert_eq!(quote.item.width_inch, Some(d("24")));
        assert_eq!(quote.item.height_inch, Some(d("36")));
        assert_eq!(quote.item.size, Some(d("6")));
    }

    #[test]
    fn test_quote_square_feet_needs_dimensions() {
        let rules = PricingRules::default();
        let err = quote_catalog_line("l1", &banner(), &pick("m280"), 1, None, &rules).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimension { .. }));
    }

    #[test]
    fn test_quote_tiny_area_rounds_to_zero_and_is_priced() {
        // 0.5 × 0.5 / 144 = 0.0017… → 0.00 sqft
        let dims = Dimensions {
            width: d("0.5"),
            height: d("0.5"),
            unit: DimensionUnit::Inches,
        };
        let quote = quote_catalog_line(
            "l1",
            &banner(),
            &pick("m280"),
            1,
            Some(&dims),
            &PricingRules::default(),
        )
        .unwrap();

        assert_eq!(quote.item.size, Some(Decimal::ZERO));
        assert_eq!(quote.breakdown.raw_total, Money::zero());
        assert_eq!(quote.breakdown.design_charge, Money::from_major(250));
        assert_eq!(quote.item.price, Money::from_major(250));
        assert_eq!(quote.item.width_inch, Some(d("0.5")));
    }

    #[test]
    fn test_quote_without_selection_fails() {
        let dims = Dimensions {
            width: d("24"),
            height: d("36"),
            unit: DimensionUnit::Inches,
        };
        let err = quote_catalog_line(
            "l1",
            &banner(),
            &HashMap::new(),
            1,
            Some(&dims),
            &PricingRules::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::NoVariantSelected { .. }));
    }

    #[test]
    fn test_quote_flat_line_without_variations() {
        let product = Product {
            id: "cards".to_string(),
            name: "Business Cards".to_string(),
            base_price: Money::from_major(800),
            pricing_type: PricingType::Flat,
            min_order_quantity: 1,
            discount_start: Some(d("10")),
            discount_end: Some(d("20")),
            discount_percentage: Some(Percentage::new(d("10"))),
            variations: vec![],
            variants: vec![],
        };
        let rules = PricingRules::default();
        let quote = quote_catalog_line("l1", &product, &HashMap::new(), 15, None, &rules).unwrap();
        assert_eq!(quote.item.price, Money::from_major(11346));
        assert_eq!(quote.item.size, None);
        assert_eq!(
            quote.item.source,
            LineSource::Catalog {
                product_id: "cards".to_string(),
                variant_id: None,
            }
        );
    }

    #[test]
    fn test_unlisted_line() {
        let rules = PricingRules::default();
        let item = unlisted_line("l9", " Wedding card ", 50, Money::from_major(2500), None, &rules)
            .unwrap();
        assert_eq!(item.price, Money::from_major(2500));
        assert_eq!(
            item.source,
            LineSource::Unlisted {
                name: "Wedding card".to_string()
            }
        );

        assert!(unlisted_line("l9", "", 1, Money::from_major(1), None, &rules).is_err());
        assert!(unlisted_line("l9", "Card", 0, Money::from_major(1), None, &rules).is_err());
        assert!(unlisted_line("l9", "Card", 1, Money::from_major(-1), None, &rules).is_err());
    }
}
