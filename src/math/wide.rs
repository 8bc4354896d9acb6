//! 256-bit intermediates for reserve and share math.
//!
//! Balances use 18 fractional digits, so a product of two realistic
//! amounts (`1_000e18 × 100_000e18`) already exceeds `u128`.  Every
//! `a × b / c` and the first-deposit square root are evaluated in
//! [`U256`]; only the final quotient is narrowed back, and a quotient
//! that does not fit fails with [`MarketError::Overflow`].

#![allow(clippy::assign_op_pattern, clippy::ptr_offset_with_cast, clippy::manual_div_ceil)]

use uint::construct_uint;

use super::Rounding;
use crate::error::MarketError;

construct_uint! {
    /// Unsigned 256-bit integer for intermediate products.
    pub struct U256(4);
}

/// Returns `a × b` without overflow.
#[must_use]
pub fn full_product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Computes `a × b / denominator` with explicit rounding.
///
/// # Errors
///
/// - [`MarketError::DivisionByZero`] if `denominator` is zero.
/// - [`MarketError::Overflow`] if the quotient exceeds `u128`.
///
/// # Examples
///
/// ```
/// use term_market::math::{mul_div, Rounding};
///
/// let big = 10u128.pow(24);
/// assert_eq!(mul_div(big, big, big, Rounding::Down), Ok(big));
/// assert_eq!(mul_div(20, 100_000, 1_020, Rounding::Down), Ok(1_960));
/// assert_eq!(mul_div(20, 100_000, 1_020, Rounding::Up), Ok(1_961));
/// ```
pub fn mul_div(
    a: u128,
    b: u128,
    denominator: u128,
    rounding: Rounding,
) -> Result<u128, MarketError> {
    if denominator == 0 {
        return Err(MarketError::DivisionByZero);
    }
    let (q, r) = full_product(a, b).div_mod(U256::from(denominator));
    let q = rounding
        .settle_quotient(q, r)
        .ok_or(MarketError::Overflow("rounded quotient exceeds u256"))?;
    narrow(q)
}

/// Integer square root of `a × b`, rounded down.
///
/// Always fits in `u128` because `a × b < 2^256`.
///
/// # Examples
///
/// ```
/// use term_market::math::sqrt_product;
///
/// assert_eq!(sqrt_product(1_000, 100_000), 10_000);
/// assert_eq!(sqrt_product(2, 3), 2);
/// ```
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    full_product(a, b).integer_sqrt().low_u128()
}

/// Narrows a 256-bit value back to `u128`.
///
/// # Errors
///
/// Returns [`MarketError::Overflow`] if `value` needs more than 128 bits.
pub fn narrow(value: U256) -> Result<u128, MarketError> {
    if value.bits() > 128 {
        return Err(MarketError::Overflow("256-bit intermediate exceeds u128"));
    }
    Ok(value.low_u128())
}
