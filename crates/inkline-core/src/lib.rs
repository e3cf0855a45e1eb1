//! # inkline-core: Pricing Engine for Inkline POS
//!
//! This crate is the **heart** of Inkline POS. It turns a product selection,
//! a quantity or area, a coupon and a staff assignment into line prices,
//! order totals, amounts due and commissions, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inkline POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Back office (forms, tables, PDF invoices)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   Catalog · Coupons · Orders · Staff   (external providers)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ immutable record snapshots             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ inkline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   units ──┐                                                     │   │
//! │  │           ├──► pricing ──► ledger ──► commission                │   │
//! │  │  variant ─┘       ▲          ▲                                  │   │
//! │  │               discount     coupon                               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Product, Order, Coupon, Staff, ...)
//! - [`money`] - Exact decimal Money type
//! - [`units`] - Width × height → square feet
//! - [`variant`] - Selections → priced variant
//! - [`discount`] - Tiered quantity/area discount
//! - [`pricing`] - Line totals and the design charge
//! - [`coupon`] - Coupon eligibility and discount
//! - [`ledger`] - Order subtotal, amount paid, amount due
//! - [`commission`] - Staff commission
//! - [`checkout`] - Cart state → priced order lines
//! - [`lookup`] - Id → record lookups for batches
//! - [`config`] - Pricing rules and per-batch context
//! - [`validation`] - Record validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; no hidden state
//! 2. **No I/O**: records are passed in, derived values are returned
//! 3. **Decimal Money**: no floating point anywhere in a price
//! 4. **Explicit Errors**: bad input is rejected before any total exists
//!
//! ## Example Usage
//!
//! ```rust
//! use inkline_core::{price_line, Money, PricingRules, PricingType, Product, Percentage};
//! use rust_decimal::Decimal;
//!
//! let product = Product {
//!     id: "poster".to_string(),
//!     name: "A2 Poster".to_string(),
//!     base_price: Money::from_major(800),
//!     pricing_type: PricingType::Flat,
//!     min_order_quantity: 1,
//!     discount_start: Some(Decimal::from(10)),
//!     discount_end: Some(Decimal::from(20)),
//!     discount_percentage: Some(Percentage::new(Decimal::from(10))),
//!     variations: vec![],
//!     variants: vec![],
//! };
//!
//! let price = price_line(&product, None, 15, None, &PricingRules::default()).unwrap();
//!
//! // 12000 less a 5.45% tier discount, truncated
//! assert_eq!(price.line_total, Money::from_major(11346));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod commission;
pub mod config;
pub mod coupon;
pub mod discount;
pub mod error;
pub mod ledger;
pub mod lookup;
pub mod money;
pub mod pricing;
pub mod types;
pub mod units;
pub mod validation;
pub mod variant;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use inkline_core::Money` instead of
// `use inkline_core::money::Money`

pub use checkout::{quote_catalog_line, unlisted_line, LineQuote};
pub use commission::{commission, commission_totals, StaffCommission};
pub use config::{AmbiguousVariantPolicy, ConfigError, PricingContext, PricingRules};
pub use coupon::{apply_coupon, CouponOutcome, CouponRejection};
pub use discount::discount_for;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{summarize, summarize_orders, summarize_with, OrderSummary};
pub use lookup::{CouponLookup, StaffLookup};
pub use money::Money;
pub use pricing::{price_line, LinePrice};
pub use types::*;
pub use units::to_square_feet;
pub use variant::{resolve_variant, Selection, Selections, VariantMatch};
