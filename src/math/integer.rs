//! Integer arithmetic for grid dimensions, block counts and name padding

use crate::io::error::{Result, invalid_parameter};
use num_traits::ToPrimitive;

/// Ceiling division for non-negative operands
///
/// Returns 0 when `divisor` is 0 so callers never divide by zero; all
/// layout code validates its divisors before reaching this point.
pub const fn ceil_div(value: usize, divisor: usize) -> usize {
    if divisor == 0 {
        0
    } else {
        value.div_ceil(divisor)
    }
}

/// Largest integer whose square does not exceed `value`
pub const fn floor_sqrt(value: usize) -> usize {
    value.isqrt()
}

/// Number of decimal digits needed to print `value` (at least 1)
pub const fn decimal_digits(value: usize) -> usize {
    let mut digits = 1;
    let mut rest = value / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

/// Convert a pixel extent to the `u32` the image buffers use
///
/// # Errors
///
/// Returns `InvalidParameter` if the value does not fit in `u32`
pub fn to_pixels(parameter: &'static str, value: usize) -> Result<u32> {
    value
        .to_u32()
        .ok_or_else(|| invalid_parameter(parameter, &value, &"exceeds the u32 pixel range"))
}

/// Multiply a cell count by a pixel extent without overflowing `u32`
///
/// # Errors
///
/// Returns `InvalidParameter` if the product does not fit in `u32`
pub fn scaled_extent(parameter: &'static str, cells: usize, extent: u32) -> Result<u32> {
    to_pixels(parameter, cells)?
        .checked_mul(extent)
        .ok_or_else(|| {
            invalid_parameter(
                parameter,
                &format!("{cells} x {extent}"),
                &"canvas extent exceeds the u32 pixel range",
            )
        })
}
