//! # Line Item Pricing
//!
//! Turns a product, its resolved variant and a quantity (plus area for
//! square-feet products) into the total for one order line.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  unit base  = base price + variant surcharge                           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  raw total  = round2(unit base × quantity)        (flat)               │
//! │             = round2(unit base × sqft per piece)  (square-feet)        │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  discounted = floor(raw total × (1 − tier% / 100))                     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  design charge: 250 if base price < 1000 and the line is ≤ 1000        │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  line total = floor(discounted + charge)               (flat)          │
//! │             = floor(discounted × quantity + charge)    (square-feet)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Intermediate values round half away from zero; totals are truncated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::PricingRules;
use crate::discount::discount_for;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Percentage, PricingType, Product, Variant};
use crate::validation::{validate_product, validate_quantity};

/// Breakdown of a priced line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LinePrice {
    /// Base price plus variant surcharge (per piece or per sqft).
    pub unit_base: Money,
    /// Before discount; per line (flat) or per piece (square-feet).
    pub raw_total: Money,
    /// Tier discount applied to `raw_total`.
    pub discount: Percentage,
    /// `raw_total` after discount, truncated.
    pub discounted_total: Money,
    /// Design surcharge, zero when waived or not applicable.
    pub design_charge: Money,
    /// What the customer pays for the line.
    pub line_total: Money,
}

/// Prices one order line.
///
/// `size` is the area of one piece in square feet and is required for
/// square-feet products; it is ignored for flat products.
///
/// ## Errors
/// Checked in this order, before any money is computed:
/// - [`CoreError::Validation`] for a malformed product or zero quantity
/// - [`CoreError::QuantityBelowMinimum`]
/// - [`CoreError::NoVariantSelected`] when the product has axes but `variant` is `None`
/// - [`CoreError::VariantNotInProduct`]
/// - [`CoreError::InvalidDimension`] when a square-feet line has no size or a negative one
///
/// A zero size is priced: an area that rounds to `0.00` sqft has a zero raw
/// total and may still carry the design charge.
pub fn price_line(
    product: &Product,
    variant: Option<&Variant>,
    quantity: u32,
    size: Option<Decimal>,
    rules: &PricingRules,
) -> CoreResult<LinePrice> {
    validate_product(product)?;
    validate_quantity(quantity)?;

    if quantity < product.min_order_quantity {
        return Err(CoreError::QuantityBelowMinimum {
            product_id: product.id.clone(),
            requested: quantity,
            minimum: product.min_order_quantity,
        });
    }

    if product.has_variations() && variant.is_none() {
        return Err(CoreError::NoVariantSelected {
            product_id: product.id.clone(),
        });
    }

    if let Some(v) = variant {
        if product.variant(&v.id).is_none() {
            return Err(CoreError::VariantNotInProduct {
                product_id: product.id.clone(),
                variant_id: v.id.clone(),
            });
        }
    }

    let basis = match product.pricing_type {
        PricingType::Flat => Decimal::from(quantity),
        PricingType::SquareFeet => match size {
            Some(area) if area >= Decimal::ZERO => area,
            other => {
                return Err(CoreError::InvalidDimension {
                    field: "size".to_string(),
                    value: other.map_or_else(|| "none".to_string(), |a| a.to_string()),
                })
            }
        },
    };

    let fraction_digits = rules.fraction_digits;
    let unit_base = product.base_price + variant.map_or_else(Money::zero, |v| v.additional_price);
    let raw_total = (unit_base * basis).round_to(fraction_digits);
    let discount = discount_for(product, basis, fraction_digits);
    let discounted_total = raw_total.discounted_by(discount).floor();

    let pieces_total = match product.pricing_type {
        PricingType::Flat => discounted_total,
        PricingType::SquareFeet => discounted_total.multiply_quantity(quantity),
    };
    let design_charge = design_charge_for(product, pieces_total, rules);
    let line_total = (pieces_total + design_charge).floor();

    debug!(
        product_id = %product.id,
        quantity,
        discount = %discount.value(),
        design_charge = %design_charge,
        line_total = %line_total,
        "Priced line"
    );

    Ok(LinePrice {
        unit_base,
        raw_total,
        discount,
        discounted_total,
        design_charge,
        line_total,
    })
}

/// Design surcharge for a line whose discounted pieces total `pieces_total`.
///
/// Single threshold, no hysteresis: the charge is re-derived from scratch
/// every time the line is priced.
fn design_charge_for(product: &Product, pieces_total: Money, rules: &PricingRules) -> Money {
    let cheap_product = product.base_price < rules.design_charge_price_ceiling;
    let waived = pieces_total > rules.design_charge_waiver_threshold;

    if cheap_product && !waived {
        rules.design_charge
    } else {
        Money::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{VariantDetail, Variation, VariationItem};

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn poster() -> Product {
        Product {
            id: "poster".to_string(),
            name: "Poster".to_string(),
            base_price: Money::from_major(800),
            pricing_type: PricingType::Flat,
            min_order_quantity: 1,
            discount_start: Some(d("10")),
            discount_end: Some(d("20")),
            discount_percentage: Some(Percentage::new(d("10"))),
            variations: vec![],
            variants: vec![],
        }
    }

    fn vinyl() -> Product {
        Product {
            id: "vinyl".to_string(),
            name: "Vinyl Print".to_string(),
            base_price: Money::from_major(30),
            pricing_type: PricingType::SquareFeet,
            min_order_quantity: 1,
            discount_start: None,
            discount_end: None,
            discount_percentage: None,
            variations: vec![Variation {
                id: "finish".to_string(),
                name: "Finish".to_string(),
                unit: String::new(),
                variation_items: vec![VariationItem {
                    id: "gloss".to_string(),
                    value: "Gloss".to_string(),
                }],
            }],
            variants: vec![Variant {
                id: "vinyl-gloss".to_string(),
                additional_price: Money::from_major(5),
                variant_details: vec![VariantDetail {
                    variation_item_id: "gloss".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn test_flat_line_with_tier_discount() {
        let price = price_line(&poster(), None, 15, None, &PricingRules::default()).unwrap();

        assert_eq!(price.unit_base, Money::from_major(800));
        assert_eq!(price.raw_total, Money::from_major(12000));
        assert_eq!(price.discount.value(), d("5.45"));
        assert_eq!(price.discounted_total, Money::from_major(11346));
        assert_eq!(price.design_charge, Money::zero());
        assert_eq!(price.line_total, Money::from_major(11346));
    }

    #[test]
    fn test_flat_line_gets_design_charge_when_small() {
        let mut product = poster();
        product.base_price = Money::from_major(150);
        let price = price_line(&product, None, 2, None, &PricingRules::default()).unwrap();

        assert_eq!(price.discounted_total, Money::from_major(300));
        assert_eq!(price.design_charge, Money::from_major(250));
        assert_eq!(price.line_total, Money::from_major(550));
    }

    #[test]
    fn test_design_charge_threshold_is_exclusive() {
        // Exactly 1000 does not exceed the threshold: charge applies.
        let mut product = poster();
        product.base_price = Money::from_major(500);
        let price = price_line(&product, None, 2, None, &PricingRules::default()).unwrap();
        assert_eq!(price.design_charge, Money::from_major(250));
        assert_eq!(price.line_total, Money::from_major(1250));

        // 1001 exceeds it: charge waived.
        product.base_price = Money::new(d("500.5"));
        let price = price_line(&product, None, 2, None, &PricingRules::default()).unwrap();
        assert_eq!(price.design_charge, Money::zero());
        assert_eq!(price.line_total, Money::from_major(1001));
    }

    #[test]
    fn test_expensive_product_never_gets_design_charge() {
        let mut product = poster();
        product.base_price = Money::from_major(1000);
        product.discount_percentage = None;
        let price = price_line(&product, None, 1, None, &PricingRules::default()).unwrap();
        assert_eq!(price.design_charge, Money::zero());
        assert_eq!(price.line_total, Money::from_major(1000));
    }

    #[test]
    fn test_square_feet_line() {
        let product = vinyl();
        let variant = product.variant("vinyl-gloss");
        // (30 + 5) × 6 sqft = 210 per piece; × 3 = 630 ≤ 1000 → +250
        let price = price_line(&product, variant, 3, Some(d("6")), &PricingRules::default())
            .unwrap();

        assert_eq!(price.unit_base, Money::from_major(35));
        assert_eq!(price.raw_total, Money::from_major(210));
        assert_eq!(price.discounted_total, Money::from_major(210));
        assert_eq!(price.design_charge, Money::from_major(250));
        assert_eq!(price.line_total, Money::from_major(880));
    }

    #[test]
    fn test_square_feet_waiver_uses_whole_line() {
        let product = vinyl();
        let variant = product.variant("vinyl-gloss");
        // 210 per piece × 5 = 1050 > 1000 → waived
        let price = price_line(&product, variant, 5, Some(d("6")), &PricingRules::default())
            .unwrap();
        assert_eq!(price.design_charge, Money::zero());
        assert_eq!(price.line_total, Money::from_major(1050));
    }

    #[test]
    fn test_square_feet_discount_uses_area_basis() {
        let mut product = vinyl();
        product.discount_start = Some(d("5"));
        product.discount_end = Some(d("14"));
        product.discount_percentage = Some(Percentage::new(d("20")));
        let variant = product.variant("vinyl-gloss");
        // area 6.5 → 5.00%; raw = round2(35 × 6.5) = 227.50; × 0.95 = 216.125 → 216
        let price = price_line(&product, variant, 1, Some(d("6.5")), &PricingRules::default())
            .unwrap();
        assert_eq!(price.discount.value(), d("5"));
        assert_eq!(price.raw_total, Money::new(d("227.5")));
        assert_eq!(price.discounted_total, Money::from_major(216));
        assert_eq!(price.line_total, Money::from_major(466));
    }

    #[test]
    fn test_square_feet_requires_size() {
        let product = vinyl();
        let variant = product.variant("vinyl-gloss");
        let err = price_line(&product, variant, 1, None, &PricingRules::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimension { .. }));

        let err = price_line(&product, variant, 1, Some(d("-1")), &PricingRules::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimension { .. }));
    }

    #[test]
    fn test_square_feet_zero_size_is_priced() {
        let product = vinyl();
        let variant = product.variant("vinyl-gloss");
        let price = price_line(&product, variant, 1, Some(d("0")), &PricingRules::default())
            .unwrap();
        assert_eq!(price.raw_total, Money::zero());
        assert_eq!(price.discounted_total, Money::zero());
        assert_eq!(price.design_charge, Money::from_major(250));
        assert_eq!(price.line_total, Money::from_major(250));
    }

    #[test]
    fn test_missing_variant_is_rejected() {
        let err = price_line(&vinyl(), None, 1, Some(d("6")), &PricingRules::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::NoVariantSelected { .. }));
    }

    #[test]
    fn test_foreign_variant_is_rejected() {
        let foreign = Variant {
            id: "other".to_string(),
            additional_price: Money::zero(),
            variant_details: vec![],
        };
        let err = price_line(&vinyl(), Some(&foreign), 1, Some(d("6")), &PricingRules::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::VariantNotInProduct { .. }));
    }

    #[test]
    fn test_quantity_below_minimum() {
        let mut product = poster();
        product.min_order_quantity = 100;
        let err = price_line(&product, None, 99, None, &PricingRules::default()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::QuantityBelowMinimum {
                requested: 99,
                minimum: 100,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_quantity_is_validation_error() {
        let err = price_line(&poster(), None, 0, None, &PricingRules::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_pricing_is_idempotent() {
        let rules = PricingRules::default();
        let product = poster();
        let first = price_line(&product, None, 13, None, &rules).unwrap();
        let second = price_line(&product, None, 13, None, &rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_line_total_never_negative() {
        let rules = PricingRules::default();
        let mut product = poster();
        product.discount_percentage = Some(Percentage::new(d("100")));
        for qty in 1..=40 {
            let price = price_line(&product, None, qty, None, &rules).unwrap();
            assert!(!price.line_total.is_negative(), "qty {qty}");
        }
    }
}
