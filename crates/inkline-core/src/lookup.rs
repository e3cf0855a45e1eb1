//! # Record Lookups
//!
//! Orders reference their coupon and staff member by id. The engine resolves
//! those ids through these traits, so callers decide where records come from
//! (a map built from one REST page, a slice, a cache) and nothing is read
//! from ambient state.
//!
//! ```text
//!  Order { coupon_id: "c-7", staff_id: "s-2" }
//!      │                    │
//!      ▼                    ▼
//!  CouponLookup::coupon  StaffLookup::staff_profile
//!      │                    │
//!      ▼                    ▼
//!  Option<&Coupon>       Option<&StaffCommissionProfile>
//! ```

use std::collections::HashMap;

use crate::types::{Coupon, StaffCommissionProfile};

/// Read-only access to coupons by id.
pub trait CouponLookup {
    fn coupon(&self, coupon_id: &str) -> Option<&Coupon>;
}

/// Read-only access to staff commission profiles by staff id.
pub trait StaffLookup {
    fn staff_profile(&self, staff_id: &str) -> Option<&StaffCommissionProfile>;
}

impl CouponLookup for HashMap<String, Coupon> {
    fn coupon(&self, coupon_id: &str) -> Option<&Coupon> {
        self.get(coupon_id)
    }
}

impl CouponLookup for [Coupon] {
    fn coupon(&self, coupon_id: &str) -> Option<&Coupon> {
        self.iter().find(|c| c.id == coupon_id)
    }
}

impl CouponLookup for Vec<Coupon> {
    fn coupon(&self, coupon_id: &str) -> Option<&Coupon> {
        self.as_slice().coupon(coupon_id)
    }
}

impl StaffLookup for HashMap<String, StaffCommissionProfile> {
    fn staff_profile(&self, staff_id: &str) -> Option<&StaffCommissionProfile> {
        self.get(staff_id)
    }
}

impl StaffLookup for [StaffCommissionProfile] {
    fn staff_profile(&self, staff_id: &str) -> Option<&StaffCommissionProfile> {
        self.iter().find(|p| p.staff_id == staff_id)
    }
}

impl StaffLookup for Vec<StaffCommissionProfile> {
    fn staff_profile(&self, staff_id: &str) -> Option<&StaffCommissionProfile> {
        self.as_slice().staff_profile(staff_id)
    }
}
