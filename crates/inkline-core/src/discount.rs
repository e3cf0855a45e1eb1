//! # Tiered Discount
//!
//! Quantity (or area) discounts that ramp up linearly across a tier.
//!
//! ## The Ramp
//! ```text
//! start = 10, end = 20, max = 10%   →  rangeLength = 11
//!
//!  discount %
//!   10.00 ┤                                  ●━━━━━━━━━━━━  (flat cap above end)
//!    9.09 ┤                               ●
//!     …   ┤                    …
//!    1.82 ┤      ●
//!    0.91 ┤   ●
//!    0.00 ┼━━━┿━━━┿━━━━━━━━━━━━━━━━━━━━━━━┿━━━━━━━━━━━━━━━━
//!         0  10  11          …           20            basis
//!
//! step(basis) = basis - start + 1          (1 at start, 11 at end)
//! discount    = round2(max × step / 11)
//! ```
//!
//! The discount reaches `max` exactly at `basis = end`, never before.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::types::{Percentage, Product};

/// Returns the discount earned by `basis` under the product's tier.
///
/// `basis` is the quantity for flat pricing and the area (sqft) for
/// square-feet pricing. Products missing any tier field earn nothing.
pub fn discount_for(product: &Product, basis: Decimal, fraction_digits: u32) -> Percentage {
    let Some(tier) = product.discount_tier() else {
        return Percentage::zero();
    };

    let pct = if basis < tier.start {
        Percentage::zero()
    } else if basis <= tier.end {
        let range_length = tier.end - tier.start + Decimal::ONE;
        let step_index = basis - tier.start + Decimal::ONE;
        let ramped = (tier.max.value() * step_index / range_length)
            .round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        Percentage::new(ramped)
    } else {
        tier.max
    };

    debug!(
        product_id = %product.id,
        basis = %basis,
        discount = %pct.value(),
        "Tier discount resolved"
    );
    pct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::PricingType;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn tiered(start: &str, end: &str, max: &str) -> Product {
        Product {
            id: "poster".to_string(),
            name: "Poster".to_string(),
            base_price: Money::from_major(800),
            pricing_type: PricingType::Flat,
            min_order_quantity: 1,
            discount_start: Some(d(start)),
            discount_end: Some(d(end)),
            discount_percentage: Some(Percentage::new(d(max))),
            variations: vec![],
            variants: vec![],
        }
    }

    #[test]
    fn test_ramp_midpoint() {
        // round2(10 × 6 / 11) = round2(5.4545…) = 5.45
        let product = tiered("10", "20", "10");
        assert_eq!(discount_for(&product, d("15"), 2).value(), d("5.45"));
    }

    #[test]
    fn test_first_step_at_start() {
        // round2(10 × 1 / 11) = 0.91
        let product = tiered("10", "20", "10");
        assert_eq!(discount_for(&product, d("10"), 2).value(), d("0.91"));
    }

    #[test]
    fn test_below_start_is_zero() {
        let product = tiered("10", "20", "10");
        for basis in ["0", "1", "9", "9.99"] {
            assert!(discount_for(&product, d(basis), 2).is_zero(), "basis {basis}");
        }
    }

    #[test]
    fn test_at_and_above_end_is_cap() {
        let product = tiered("10", "20", "10");
        for basis in ["20", "20.5", "21", "5000"] {
            assert_eq!(discount_for(&product, d(basis), 2).value(), d("10"), "basis {basis}");
        }
    }

    #[test]
    fn test_monotonic_within_tier() {
        let product = tiered("10", "20", "12.5");
        let mut previous = Percentage::zero();
        let mut basis = d("10");
        while basis <= d("20") {
            let pct = discount_for(&product, basis, 2);
            assert!(pct >= previous, "dropped at basis {basis}");
            assert!(pct.value() <= d("12.5"));
            previous = pct;
            basis += d("0.25");
        }
    }

    #[test]
    fn test_fractional_area_basis() {
        // Square-feet basis: start 5, end 14, max 20 → range 10
        // basis 6.5 → step 2.5 → 20 × 2.5 / 10 = 5.00
        let product = tiered("5", "14", "20");
        assert_eq!(discount_for(&product, d("6.5"), 2).value(), d("5"));
    }

    #[test]
    fn test_missing_tier_field_means_no_discount() {
        let mut product = tiered("10", "20", "10");
        product.discount_percentage = None;
        assert!(discount_for(&product, d("50"), 2).is_zero());

        let mut product = tiered("10", "20", "10");
        product.discount_start = None;
        assert!(discount_for(&product, d("50"), 2).is_zero());
    }
}
