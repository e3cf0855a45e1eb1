//! # Staff Commission
//!
//! Commission is a straight percentage of the coupon-adjusted order total.
//! It is returned unrounded; rounding for payslips is a display concern.
//!
//! ```text
//! coupon-adjusted total 10211  ×  commission 5%  =  510.55
//! unassigned order             →  0 (not an error)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::config::PricingContext;
use crate::error::CoreResult;
use crate::ledger::summarize_with;
use crate::lookup::{CouponLookup, StaffLookup};
use crate::money::Money;
use crate::types::{Order, StaffCommissionProfile, StaffRole};
use crate::validation::validate_staff_profile;

/// Commission earned on one order total.
///
/// `None` staff means the order is unassigned and earns nothing.
///
/// ## Errors
/// [`crate::CoreError::InvalidStaffProfile`] when the profile's percentage is
/// outside 0..=100 (or it carries a design charge without being a designer).
pub fn commission(
    staff: Option<&StaffCommissionProfile>,
    coupon_adjusted_total: Money,
) -> CoreResult<Money> {
    let Some(profile) = staff else {
        return Ok(Money::zero());
    };

    validate_staff_profile(profile)?;
    Ok(coupon_adjusted_total.percent_of(profile.commission_percentage))
}

/// Commission totals for one staff member across a batch of orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffCommission {
    pub staff_id: String,
    /// `None` when the staff directory has no profile for this id.
    pub role: Option<StaffRole>,
    pub order_count: usize,
    /// Σ coupon-adjusted totals of the staff member's orders.
    pub total_sales: Money,
    pub commission: Money,
}

/// Groups commission by staff member for a batch of orders.
///
/// All coupons are judged at `ctx.as_of`. Unassigned orders are skipped. A
/// staff id the directory doesn't know still gets a row, with zero commission.
/// Rows are sorted by staff id.
pub fn commission_totals<C, S>(
    orders: &[Order],
    coupons: &C,
    staff: &S,
    ctx: &PricingContext,
) -> CoreResult<Vec<StaffCommission>>
where
    C: CouponLookup + ?Sized,
    S: StaffLookup + ?Sized,
{
    let mut rows: BTreeMap<&str, StaffCommission> = BTreeMap::new();

    for order in orders {
        let Some(staff_id) = order.staff_id.as_deref() else {
            continue;
        };

        let summary = summarize_with(order, coupons, ctx);
        let profile = staff.staff_profile(staff_id);
        if profile.is_none() {
            warn!(order_id = %order.id, staff_id = %staff_id, "Staff profile not found");
        }
        let earned = commission(profile, summary.coupon_adjusted_total)?;

        let row = rows.entry(staff_id).or_insert_with(|| StaffCommission {
            staff_id: staff_id.to_string(),
            role: profile.map(|p| p.role),
            order_count: 0,
            total_sales: Money::zero(),
            commission: Money::zero(),
        });
        row.order_count += 1;
        row.total_sales += summary.coupon_adjusted_total;
        row.commission += earned;
    }

    debug!(orders = orders.len(), staff = rows.len(), "Commission totals computed");
    Ok(rows.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingRules;
    use crate::types::{LineSource, OrderLineItem, Percentage};
    use crate::CoreError;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn agent(id: &str, pct: &str) -> StaffCommissionProfile {
        StaffCommissionProfile {
            staff_id: id.to_string(),
            commission_percentage: Percentage::new(d(pct)),
            role: StaffRole::Agent,
            design_charge: None,
        }
    }

    fn order(id: &str, staff_id: Option<&str>, price: i64) -> Order {
        Order {
            id: id.to_string(),
            order_items: vec![OrderLineItem {
                id: format!("{id}-1"),
                source: LineSource::Unlisted {
                    name: "Custom job".to_string(),
                },
                quantity: 1,
                size: None,
                width_inch: None,
                height_inch: None,
                price: Money::from_major(price),
            }],
            coupon_id: None,
            order_total_price: Money::from_major(price),
            payments: vec![],
            staff_id: staff_id.map(str::to_string),
        }
    }

    fn ctx() -> PricingContext {
        let as_of = DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        PricingContext::new(PricingRules::default(), as_of)
    }

    #[test]
    fn test_commission_unrounded() {
        let profile = agent("s1", "5");
        let earned = commission(Some(&profile), Money::from_major(10211)).unwrap();
        assert_eq!(earned.amount(), d("510.55"));

        let profile = agent("s1", "3");
        let earned = commission(Some(&profile), Money::new(d("333.33"))).unwrap();
        assert_eq!(earned.amount(), d("9.9999"));
    }

    #[test]
    fn test_unassigned_order_earns_nothing() {
        assert_eq!(commission(None, Money::from_major(10211)).unwrap(), Money::zero());
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let profile = agent("s1", "120");
        let err = commission(Some(&profile), Money::from_major(100)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStaffProfile { .. }));
    }

    #[test]
    fn test_commission_totals_groups_by_staff() {
        let staff = vec![agent("s1", "5"), agent("s2", "10")];
        let orders = vec![
            order("o1", Some("s2"), 1000),
            order("o2", Some("s1"), 2000),
            order("o3", None, 9999),
            order("o4", Some("s1"), 500),
            order("o5", Some("ghost"), 700),
        ];
        let coupons: Vec<crate::types::Coupon> = vec![];

        let rows = commission_totals(&orders, &coupons, &staff, &ctx()).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.staff_id.as_str()).collect();
        assert_eq!(ids, vec!["ghost", "s1", "s2"]);

        assert_eq!(rows[0].commission, Money::zero());
        assert_eq!(rows[0].role, None);

        assert_eq!(rows[1].order_count, 2);
        assert_eq!(rows[1].total_sales, Money::from_major(2500));
        assert_eq!(rows[1].commission, Money::from_major(125));

        assert_eq!(rows[2].commission, Money::from_major(100));
        assert_eq!(rows[2].role, Some(StaffRole::Agent));
    }

    #[test]
    fn test_commission_totals_propagates_invalid_profile() {
        let staff = vec![agent("s1", "101")];
        let orders = vec![order("o1", Some("s1"), 1000)];
        let coupons: Vec<crate::types::Coupon> = vec![];
        assert!(commission_totals(&orders, &coupons, &staff, &ctx()).is_err());
    }
}
