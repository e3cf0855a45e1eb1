//! Width × height → square feet.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{CoreError, CoreResult};
use crate::types::{DimensionUnit, Dimensions};

/// Square inches in one square foot.
const SQ_INCHES_PER_SQ_FOOT: i64 = 144;

/// Inches in one foot.
const INCHES_PER_FOOT: i64 = 12;

/// Converts a width/height pair to an area in square feet, rounded to
/// `fraction_digits` places (half away from zero).
///
/// ## Errors
/// [`CoreError::InvalidDimension`] when either side is zero or negative.
///
/// ## Example
/// ```rust
/// use inkline_core::units::to_square_feet;
/// use inkline_core::types::DimensionUnit;
/// use rust_decimal::Decimal;
///
/// let (width, height) = (Decimal::from(24), Decimal::from(36));
/// let area = to_square_feet(width, height, DimensionUnit::Inches, 2).unwrap();
/// assert_eq!(area, Decimal::from(6));
/// ```
pub fn to_square_feet(
    width: Decimal,
    height: Decimal,
    unit: DimensionUnit,
    fraction_digits: u32,
) -> CoreResult<Decimal> {
    require_positive("width", width)?;
    require_positive("height", height)?;

    let area = match unit {
        DimensionUnit::Feet => width * height,
        DimensionUnit::Inches => width * height / Decimal::from(SQ_INCHES_PER_SQ_FOOT),
    };

    Ok(area.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero))
}

/// Area of a [`Dimensions`] value, see [`to_square_feet`].
pub fn area_of(dimensions: &Dimensions, fraction_digits: u32) -> CoreResult<Decimal> {
    to_square_feet(dimensions.width, dimensions.height, dimensions.unit, fraction_digits)
}

/// Expresses the dimensions in inches, as line items record them.
pub fn to_inches(dimensions: &Dimensions) -> (Decimal, Decimal) {
    match dimensions.unit {
        DimensionUnit::Inches => (dimensions.width, dimensions.height),
        DimensionUnit::Feet => {
            let per_foot = Decimal::from(INCHES_PER_FOOT);
            (dimensions.width * per_foot, dimensions.height * per_foot)
        }
    }
}

fn require_positive(field: &str, value: Decimal) -> CoreResult<()> {
    if value <= Decimal::ZERO {
        return Err(CoreError::InvalidDimension {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}
