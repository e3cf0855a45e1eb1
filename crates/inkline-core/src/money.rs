//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    12000 × 0.9455 = 11345.999999999998  → floor() = 11345  ❌ WRONG!    │
//! │                                                                         │
//! │  Pricing truncates the discounted total, so a float that lands a hair  │
//! │  below the true value loses a whole currency unit.                      │
//! │                                                                         │
//! │  OUR SOLUTION: Base-10 Decimal                                          │
//! │    12000 × 0.9455 = 11346.0000 exactly → floor() = 11346               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Vocabulary
//! Two operations, used in two different places:
//! - [`Money::round_to`] - half away from zero, for intermediate values
//! - [`Money::floor`] - truncation toward -∞, for final totals
//!
//! ## Usage
//! ```rust
//! use inkline_core::money::Money;
//!
//! let base = Money::from_major(800);
//! let raw = base.multiply_quantity(15);
//! assert_eq!(raw, Money::from_major(12000));
//!
//! // NEVER do this:
//! // let bad = Money::from_f64(10.99); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percentage;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the shop's currency.
///
/// ## Design Decisions
/// - **Decimal (signed)**: catalog inputs are non-negative, but a derived
///   amount due goes negative when an order is overpaid
/// - **Single field tuple struct**: zero-cost wrapper, `Copy` like the inner value
/// - **Serialized as a string**: `"11346.00"`, never a JSON float
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.base_price + Variant.additional_price ──► unit base            │
/// │        │                                                                │
/// │        ▼                                                                │
/// │  raw total ──► discounted total ──► + design charge ──► line price      │
/// │                                                                         │
/// │  Σ line prices ──► coupon ──► adjusted total ──► amount due, commission │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use inkline_core::money::Money;
    ///
    /// let charge = Money::from_major(250);
    /// assert_eq!(charge.to_string(), "250.00");
    /// ```
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the inner decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to `fraction_digits` decimal places, half away from zero.
    ///
    /// Issued invoices show amounts rounded this way.
    ///
    /// ## Example
    /// ```rust
    /// use inkline_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::new(Decimal::new(12345, 3)); // 12.345
    /// assert_eq!(m.round_to(2).amount(), Decimal::new(1235, 2));
    /// ```
    pub fn round_to(&self, fraction_digits: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Truncates to a whole currency unit (toward negative infinity).
    ///
    /// ## Example
    /// ```rust
    /// use inkline_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::new(Decimal::new(102114, 1)); // 10211.4
    /// assert_eq!(m.floor(), Money::from_major(10211));
    /// ```
    #[inline]
    pub fn floor(&self) -> Money {
        Money(self.0.floor())
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }

    /// Returns `pct` percent of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use inkline_core::money::Money;
    /// use inkline_core::types::Percentage;
    /// use rust_decimal::Decimal;
    ///
    /// let total = Money::from_major(10211);
    /// let five = Percentage::new(Decimal::from(5));
    /// assert_eq!(total.percent_of(five).amount(), Decimal::new(51055, 2));
    /// ```
    #[inline]
    pub fn percent_of(&self, pct: Percentage) -> Money {
        Money(self.0 * pct.fraction())
    }

    /// Returns this amount reduced by `pct` percent, unrounded.
    ///
    /// Callers decide whether the result is floored or rounded.
    #[inline]
    pub fn discounted_by(&self, pct: Percentage) -> Money {
        Money(self.0 * pct.complement())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency symbol.
///
/// ## Note
/// Currency symbols and localisation belong to the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a decimal factor (areas, ratios).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
