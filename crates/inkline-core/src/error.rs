//! # Error Types
//!
//! Domain-specific error types for inkline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  inkline-core errors (this file)                                       │
//! │  ├── CoreError        - Pricing rule violations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  inkline-core config (config.rs)                                       │
//! │  └── ConfigError      - Bad pricing rules                              │
//! │                                                                         │
//! │  NOT errors:                                                            │
//! │  └── CouponOutcome { applied: false, .. } - inactive / expired /       │
//! │      below minimum coupons are a normal business outcome               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, quantities)
//! 3. Errors are enum variants, never String
//! 4. Validation fails before any money is computed; no partial totals

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing engine errors.
///
/// Every variant means the inputs cannot be priced at all. Callers should
/// show the message and refuse to persist a total.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Width or height is zero or negative, or a square-feet line has no size.
    #[error("Invalid dimension: {field} must be greater than zero, got {value}")]
    InvalidDimension { field: String, value: String },

    /// Product has variation axes but no variant was resolved.
    ///
    /// ## User Workflow
    /// ```text
    /// Select product "Flex Banner" (axes: Material, Finish)
    ///      │
    ///      ▼
    /// Pick Material only
    ///      │
    ///      ▼
    /// NoVariantSelected { product_id: "flex-banner" }
    ///      │
    ///      ▼
    /// UI shows: "Select all options before adding to the order"
    /// ```
    #[error("Product {product_id} has variations but no variant is selected")]
    NoVariantSelected { product_id: String },

    /// More than one variant matches the same selection set.
    ///
    /// This is a catalog data bug: two variants share a combination.
    #[error("Product {product_id} has several variants matching the selection: {variant_ids:?}")]
    AmbiguousVariant {
        product_id: String,
        variant_ids: Vec<String>,
    },

    /// A variant was supplied that does not belong to the product.
    #[error("Variant {variant_id} does not belong to product {product_id}")]
    VariantNotInProduct {
        product_id: String,
        variant_id: String,
    },

    /// Quantity is below the product's minimum order quantity.
    #[error("Product {product_id} requires at least {minimum} pieces, requested {requested}")]
    QuantityBelowMinimum {
        product_id: String,
        requested: u32,
        minimum: u32,
    },

    /// Staff profile cannot be used for commission.
    #[error("Invalid staff profile {staff_id}: {reason}")]
    InvalidStaffProfile { staff_id: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a record doesn't meet basic shape requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format or inconsistent fields.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
