//! # Domain Types
//!
//! Core domain records consumed by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │    Coupon       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  base_price     │   │  order_items    │   │  discount_type  │       │
//! │  │  pricing_type   │   │  coupon_id ─────┼──►│  amount         │       │
//! │  │  discount tier  │   │  payments       │   │  minimum_amount │       │
//! │  │  variations     │   │  staff_id ──┐   │   │  end_date       │       │
//! │  │  variants       │   └─────────────┼───┘   └─────────────────┘       │
//! │  └─────────────────┘                 │                                  │
//! │                                      ▼                                  │
//! │                        ┌──────────────────────────┐                    │
//! │                        │ StaffCommissionProfile   │                    │
//! │                        │  commission_percentage   │                    │
//! │                        │  role, design_charge     │                    │
//! │                        └──────────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ids, Not Object Graphs
//! Records reference each other only by id (`coupon_id`, `staff_id`,
//! `variation_item_id`). The caller looks the referenced record up and passes
//! it in explicitly; nothing here holds a pointer to another record.
//!
//! All records use camelCase field names on the wire, matching the back
//! office REST API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in the range `[0, 100]`.
///
/// `Percentage::new(Decimal::from(10))` means 10%. Range checks live in
/// [`crate::validation::validate_percentage`]; this type only carries the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(#[ts(type = "string")] Decimal);

impl Percentage {
    /// Creates a percentage from its value in percent units.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Percentage(value)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(Decimal::ZERO)
    }

    /// Returns the value in percent units (10% → 10).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the value as a fraction (10% → 0.10).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns `1 - fraction` (10% → 0.90).
    #[inline]
    pub fn complement(&self) -> Decimal {
        Decimal::ONE - self.fraction()
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

// =============================================================================
// Catalog: Product, Variation, Variant
// =============================================================================

/// How a product's line price is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PricingType {
    /// Price × quantity. Discount basis is the quantity.
    #[default]
    Flat,
    /// Price × area per piece, then × quantity. Discount basis is the area.
    SquareFeet,
}

/// One selectable option on a variation axis (e.g. "Red").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariationItem {
    pub id: String,
    pub value: String,
}

/// One selectable axis of a product (e.g. "Color", "Material").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub id: String,
    /// Axis name; selections are keyed by this.
    pub name: String,
    /// Unit the axis is measured in ("mm", "gsm", "" for none).
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub variation_items: Vec<VariationItem>,
}

impl Variation {
    /// Checks whether `item_id` is one of this axis' options.
    pub fn owns_item(&self, item_id: &str) -> bool {
        self.variation_items.iter().any(|item| item.id == item_id)
    }
}

/// One entry of a variant's combination: the chosen item on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantDetail {
    pub variation_item_id: String,
}

/// A concrete combination of one item per axis, with its own surcharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    /// Added on top of the product base price.
    #[serde(default)]
    pub additional_price: Money,
    #[serde(default)]
    pub variant_details: Vec<VariantDetail>,
}

/// A product in the catalog.
///
/// ## Discount Tier
/// `discount_start`, `discount_end` and `discount_percentage` together define
/// the tier. If any of the three is absent, the product is never discounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Price per piece (flat) or per square foot (square-feet).
    pub base_price: Money,

    #[serde(default)]
    pub pricing_type: PricingType,

    /// Smallest quantity that may be ordered.
    #[serde(default = "default_min_order_quantity")]
    pub min_order_quantity: u32,

    /// First basis value (quantity or sqft) that earns a discount.
    #[ts(type = "string | null")]
    pub discount_start: Option<Decimal>,

    /// Basis value at which the discount reaches its maximum.
    #[ts(type = "string | null")]
    pub discount_end: Option<Decimal>,

    /// Maximum discount in percent.
    pub discount_percentage: Option<Percentage>,

    #[serde(default)]
    pub variations: Vec<Variation>,

    #[serde(default)]
    pub variants: Vec<Variant>,
}

fn default_min_order_quantity() -> u32 {
    1
}

/// The three discount tier fields, present together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountTier {
    pub start: Decimal,
    pub end: Decimal,
    pub max: Percentage,
}

impl Product {
    /// Returns the discount tier, or `None` if any field is missing.
    pub fn discount_tier(&self) -> Option<DiscountTier> {
        Some(DiscountTier {
            start: self.discount_start?,
            end: self.discount_end?,
            max: self.discount_percentage?,
        })
    }

    /// Checks whether the product declares any variation axes.
    #[inline]
    pub fn has_variations(&self) -> bool {
        !self.variations.is_empty()
    }

    /// Finds the axis that owns a variation item.
    pub fn axis_of_item(&self, item_id: &str) -> Option<&Variation> {
        self.variations.iter().find(|axis| axis.owns_item(item_id))
    }

    /// Finds one of this product's variants by id.
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Unit a width/height pair is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    Inches,
    Feet,
}

/// A width × height measurement entered at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[ts(type = "string")]
    pub width: Decimal,
    #[ts(type = "string")]
    pub height: Decimal,
    pub unit: DimensionUnit,
}

// =============================================================================
// Order Line Item
// =============================================================================

/// What a line item was sold from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LineSource {
    /// A catalog product, with the variant that priced it (if it has axes).
    #[serde(rename_all = "camelCase")]
    Catalog {
        product_id: String,
        variant_id: Option<String>,
    },
    /// An ad hoc product with no catalog id, priced by hand.
    #[serde(rename_all = "camelCase")]
    Unlisted { name: String },
}

/// A line in an order.
///
/// `price` is the total for the line (all pieces, discount and design
/// charge included), not a unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub id: String,
    pub source: LineSource,
    pub quantity: u32,
    /// Area per piece in sqft; only for square-feet pricing.
    #[ts(type = "string | null")]
    pub size: Option<Decimal>,
    #[ts(type = "string | null")]
    pub width_inch: Option<Decimal>,
    #[ts(type = "string | null")]
    pub height_inch: Option<Decimal>,
    pub price: Money,
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon reduces the order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CouponDiscountType {
    /// Subtract `amount` currency units.
    Flat,
    /// Subtract `amount` percent, truncating the result.
    Percentage,
}

/// A coupon, as supplied by the coupon provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub discount_type: CouponDiscountType,
    /// Currency units for `flat`, percent for `percentage`.
    #[ts(type = "string")]
    pub amount: Decimal,
    #[serde(default)]
    pub minimum_amount: Money,
    #[ts(as = "String")]
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}

impl Coupon {
    /// A coupon expires strictly after its end date.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.end_date < now
    }
}

// =============================================================================
// Payment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    MobileBanking,
}

/// A payment recorded against an order.
///
/// Only payments with `is_paid = true` count toward the amount paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub amount: Money,
    pub is_paid: bool,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Order
// =============================================================================

/// An order, as supplied by the order store.
///
/// Coupon-adjusted total, amount paid and amount due are derived by
/// [`crate::ledger::summarize`] and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub order_items: Vec<OrderLineItem>,
    pub coupon_id: Option<String>,
    /// Pre-coupon sum of line prices, as last persisted.
    #[serde(default)]
    pub order_total_price: Money,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub staff_id: Option<String>,
}

// =============================================================================
// Staff
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Agent,
    Designer,
}

/// Commission settings for one staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffCommissionProfile {
    pub staff_id: String,
    pub commission_percentage: Percentage,
    pub role: StaffRole,
    /// Only meaningful for designers.
    pub design_charge: Option<Money>,
}

// =============================================================================
// Unit Tests
// =============================================================================
