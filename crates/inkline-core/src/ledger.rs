//! # Order Ledger
//!
//! Derives an order's totals from its stored lines and payments.
//!
//! ## Derived Values
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order_items ──► Σ price ──────────────► subtotal                       │
//! │                                             │                           │
//! │  coupon_id ──► CouponLookup ──► apply ──────┴──► coupon-adjusted total  │
//! │                                                      │                  │
//! │  payments ──► Σ amount where is_paid ──► total paid  │                  │
//! │                                             │        │                  │
//! │                                             ▼        ▼                  │
//! │                              amount due = adjusted − paid  (may be < 0) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is written back to the order; the caller persists or
//! displays the summary.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::config::{PricingContext, PricingRules};
use crate::coupon::{apply_coupon, CouponOutcome, CouponRejection};
use crate::lookup::CouponLookup;
use crate::money::Money;
use crate::types::{Coupon, Order};

/// Totals derived for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: String,
    /// Σ line prices, before the coupon.
    pub subtotal: Money,
    pub coupon_adjusted_total: Money,
    pub coupon_applied: bool,
    /// Set when the order names a coupon that was not applied.
    pub coupon_rejection: Option<CouponRejection>,
    /// Σ payments with `is_paid = true`.
    pub total_paid: Money,
    /// Negative when the customer has overpaid.
    pub amount_due: Money,
    /// Advisory up-front amount; never enforced.
    pub suggested_initial_payment: Money,
    pub is_overpaid: bool,
    /// The persisted `order_total_price` disagrees with Σ line prices.
    pub stored_total_mismatch: bool,
}

/// Σ of line prices.
pub fn subtotal(order: &Order) -> Money {
    order.order_items.iter().map(|item| item.price).sum()
}

/// Σ of payments that have actually been received.
pub fn total_paid(order: &Order) -> Money {
    order
        .payments
        .iter()
        .filter(|p| p.is_paid)
        .map(|p| p.amount)
        .sum()
}

/// Suggested first payment: `floor(subtotal × ratio)`.
pub fn suggested_initial_payment(subtotal: Money, rules: &PricingRules) -> Money {
    (subtotal * rules.initial_payment_ratio).floor()
}

/// Applies the order's coupon, if it names one.
///
/// `coupon` is what the caller looked up for `order.coupon_id`. A coupon
/// whose id differs from the order's is treated as not found.
pub fn resolve_order_coupon(
    order: &Order,
    coupon: Option<&Coupon>,
    subtotal: Money,
    ctx: &PricingContext,
) -> CouponOutcome {
    let Some(coupon_id) = order.coupon_id.as_deref() else {
        return CouponOutcome {
            discounted_total: subtotal,
            applied: false,
            rejection: None,
        };
    };

    match coupon.filter(|c| c.id == coupon_id) {
        Some(coupon) => apply_coupon(Some(coupon), subtotal, ctx.as_of),
        None => {
            warn!(order_id = %order.id, coupon_id = %coupon_id, "Order coupon not found");
            CouponOutcome::not_applied(subtotal, CouponRejection::NotFound)
        }
    }
}

/// Summarizes one order against its (already looked up) coupon.
pub fn summarize(order: &Order, coupon: Option<&Coupon>, ctx: &PricingContext) -> OrderSummary {
    let subtotal = subtotal(order);

    let stored_total_mismatch = order.order_total_price != subtotal;
    if stored_total_mismatch {
        warn!(
            order_id = %order.id,
            stored = %order.order_total_price,
            computed = %subtotal,
            "Stored order total differs from line prices"
        );
    }

    let outcome = resolve_order_coupon(order, coupon, subtotal, ctx);
    let coupon_adjusted_total = outcome.discounted_total;
    let total_paid = total_paid(order);
    let amount_due = coupon_adjusted_total - total_paid;

    debug!(
        order_id = %order.id,
        subtotal = %subtotal,
        adjusted = %coupon_adjusted_total,
        paid = %total_paid,
        due = %amount_due,
        "Order summarized"
    );

    OrderSummary {
        order_id: order.id.clone(),
        subtotal,
        coupon_adjusted_total,
        coupon_applied: outcome.applied,
        coupon_rejection: outcome.rejection,
        total_paid,
        amount_due,
        suggested_initial_payment: suggested_initial_payment(subtotal, &ctx.rules),
        is_overpaid: amount_due.is_negative(),
        stored_total_mismatch,
    }
}

/// Summarizes one order, looking its coupon up by id.
pub fn summarize_with<C>(order: &Order, coupons: &C, ctx: &PricingContext) -> OrderSummary
where
    C: CouponLookup + ?Sized,
{
    let coupon = order.coupon_id.as_deref().and_then(|id| coupons.coupon(id));
    summarize(order, coupon, ctx)
}

/// Summarizes a batch of orders under one pricing context.
///
/// Every order is computed independently; the output keeps input order.
pub fn summarize_orders<C>(orders: &[Order], coupons: &C, ctx: &PricingContext) -> Vec<OrderSummary>
where
    C: CouponLookup + ?Sized,
{
    orders
        .iter()
        .map(|order| summarize_with(order, coupons, ctx))
        .collect()
}
