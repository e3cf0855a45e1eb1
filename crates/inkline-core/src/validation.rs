//! # Validation Module
//!
//! Input validation for records handed to the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Back-office forms                                            │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (serde)                                      │
//! │  ├── Type validation (unsigned quantities, decimal money)              │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing                                                      │
//! │  ├── InvalidDimension, QuantityBelowMinimum                            │
//! │  └── NoVariantSelected, AmbiguousVariant                               │
//! │                                                                         │
//! │  Nothing is priced until every layer has passed                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inkline_core::validation::{validate_quantity, validate_percentage};
//! use inkline_core::types::Percentage;
//! use rust_decimal::Decimal;
//!
//! validate_quantity(5).unwrap();
//! assert!(validate_percentage("commission", Percentage::new(Decimal::from(101))).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{
    Coupon, CouponDiscountType, Percentage, Product, StaffCommissionProfile, StaffRole,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// Minimum order quantities are a per-product rule and are checked by the
/// line pricer, not here.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates that a monetary input is zero or positive.
pub fn validate_money_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
pub fn validate_percentage(field: &str, pct: Percentage) -> ValidationResult<()> {
    if pct.value() < Decimal::ZERO || pct.value() > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Cannot pay zero or negative amounts
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a catalog product before it is priced.
///
/// ## Rules
/// - Base price and every variant surcharge are non-negative
/// - Minimum order quantity is at least 1
/// - Discount percentage (if present) is within 0..=100
/// - Discount start does not exceed discount end (if both present)
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    validate_money_non_negative("base price", product.base_price)?;

    if product.min_order_quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "minimum order quantity".to_string(),
        });
    }

    if let Some(pct) = product.discount_percentage {
        validate_percentage("discount percentage", pct)?;
    }

    if let (Some(start), Some(end)) = (product.discount_start, product.discount_end) {
        if start > end {
            return Err(ValidationError::InvalidFormat {
                field: "discount range".to_string(),
                reason: format!("start {} is after end {}", start, end),
            });
        }
    }

    for variant in &product.variants {
        validate_money_non_negative("variant additional price", variant.additional_price)?;
    }

    Ok(())
}

/// Validates a coupon record.
///
/// Note this does not check whether the coupon *applies*; an inactive or
/// expired coupon is valid data and simply yields "not applied".
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    if coupon.code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if coupon.amount < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: "coupon amount".to_string(),
        });
    }

    if coupon.discount_type == CouponDiscountType::Percentage {
        validate_percentage("coupon amount", Percentage::new(coupon.amount))?;
    }

    validate_money_non_negative("coupon minimum amount", coupon.minimum_amount)
}

/// Validates a staff profile before commission is computed.
///
/// ## Rules
/// - Commission percentage is within 0..=100
/// - A design charge is only set on designers, and is non-negative
///
/// Returns [`CoreError::InvalidStaffProfile`] rather than a field error,
/// because a bad profile blocks commission for every order it is attached to.
pub fn validate_staff_profile(profile: &StaffCommissionProfile) -> CoreResult<()> {
    let invalid = |reason: String| CoreError::InvalidStaffProfile {
        staff_id: profile.staff_id.clone(),
        reason,
    };

    validate_percentage("commission percentage", profile.commission_percentage)
        .map_err(|e| invalid(e.to_string()))?;

    if let Some(charge) = profile.design_charge {
        if profile.role != StaffRole::Designer {
            return Err(invalid("design charge is only allowed for designers".to_string()));
        }
        validate_money_non_negative("design charge", charge).map_err(|e| invalid(e.to_string()))?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
