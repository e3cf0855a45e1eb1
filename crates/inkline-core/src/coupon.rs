//! # Coupon Resolution
//!
//! Decides whether a coupon applies to an order total and, if so, what the
//! total becomes.
//!
//! ## Not Qualifying Is Not an Error
//! ```text
//! apply_coupon(coupon, 4000, now)
//!      │
//!      ├── no coupon ............ CouponOutcome { 4000, applied: false, NoCoupon }
//!      ├── is_active = false .... CouponOutcome { 4000, applied: false, Inactive }
//!      ├── end_date < now ....... CouponOutcome { 4000, applied: false, Expired }
//!      ├── 4000 < minimum ....... CouponOutcome { 4000, applied: false, BelowMinimum }
//!      └── otherwise ............ CouponOutcome { discounted, applied: true }
//! ```
//! The caller always gets a usable total back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Coupon, CouponDiscountType, Percentage};

/// Why a coupon was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponRejection {
    /// No coupon was given.
    NoCoupon,
    /// The order names a coupon the coupon provider doesn't know.
    NotFound,
    Inactive,
    Expired,
    BelowMinimum,
}

/// Result of applying (or failing to apply) a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CouponOutcome {
    pub discounted_total: Money,
    pub applied: bool,
    pub rejection: Option<CouponRejection>,
}

impl CouponOutcome {
    /// The order total passes through untouched.
    pub fn not_applied(order_total: Money, reason: CouponRejection) -> Self {
        CouponOutcome {
            discounted_total: order_total,
            applied: false,
            rejection: Some(reason),
        }
    }
}

/// Checks whether `coupon` may be used on `order_total` at `now`.
pub fn check_eligibility(
    coupon: &Coupon,
    order_total: Money,
    now: DateTime<Utc>,
) -> Result<(), CouponRejection> {
    if !coupon.is_active {
        return Err(CouponRejection::Inactive);
    }
    if coupon.is_expired(now) {
        return Err(CouponRejection::Expired);
    }
    if order_total < coupon.minimum_amount {
        return Err(CouponRejection::BelowMinimum);
    }
    Ok(())
}

/// Applies a coupon to an order total.
///
/// - `flat`: `max(0, total − amount)`
/// - `percentage`: `floor(total × (1 − amount / 100))`
///
/// The result is never negative and never above `order_total`.
pub fn apply_coupon(
    coupon: Option<&Coupon>,
    order_total: Money,
    now: DateTime<Utc>,
) -> CouponOutcome {
    let Some(coupon) = coupon else {
        return CouponOutcome::not_applied(order_total, CouponRejection::NoCoupon);
    };

    if let Err(reason) = check_eligibility(coupon, order_total, now) {
        debug!(code = %coupon.code, reason = ?reason, "Coupon not applied");
        return CouponOutcome::not_applied(order_total, reason);
    }

    let discounted = match coupon.discount_type {
        CouponDiscountType::Flat => order_total - Money::new(coupon.amount),
        CouponDiscountType::Percentage => order_total
            .discounted_by(Percentage::new(coupon.amount))
            .floor(),
    };
    let discounted_total = discounted.max(Money::zero()).min(order_total);

    debug!(
        code = %coupon.code,
        order_total = %order_total,
        discounted_total = %discounted_total,
        "Coupon applied"
    );

    CouponOutcome {
        discounted_total,
        applied: true,
        rejection: None,
    }
}
