//! Constant-product pricing.
//!
//! # Exact input (what a swap executes)
//!
//! ```text
//! amount_out = ⌊ amount_in × reserve_out / (reserve_in + amount_in) ⌋
//! reserve_in'  = reserve_in + amount_in
//! reserve_out' = reserve_out − amount_out
//! ```
//!
//! No fee is deducted.  Flooring the output is the only value the pool
//! keeps, which makes `reserve_in' × reserve_out'` non-decreasing.
//!
//! # Exact output (quoting only)
//!
//! ```text
//! amount_in = ⌈ reserve_in × amount_out / (reserve_out − amount_out) ⌉
//! ```
//!
//! the smallest input whose exact-input output is at least `amount_out`.

use crate::domain::Amount;
use crate::error::{MarketError, Result};
use crate::math::{mul_div, CheckedArithmetic, Rounding};

/// Output paid for `amount_in` against `(reserve_in, reserve_out)`.
///
/// # Errors
///
/// - [`MarketError::InvalidAmount`] if `amount_in` is zero.
/// - [`MarketError::EmptyPool`] if either reserve is zero.
/// - [`MarketError::InsufficientOutput`] if the output floors to zero.
/// - [`MarketError::Overflow`] if `reserve_in + amount_in` overflows.
pub fn output_for_input(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if amount_in.is_zero() {
        return Err(MarketError::InvalidAmount("swap input must be positive"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(MarketError::EmptyPool);
    }

    let denominator = reserve_in.safe_add(&amount_in)?;
    let out = mul_div(
        amount_in.get(),
        reserve_out.get(),
        denominator.get(),
        Rounding::Down,
    )?;

    if out == 0 {
        return Err(MarketError::InsufficientOutput);
    }
    Ok(Amount::new(out))
}

/// Smallest input that yields at least `amount_out`.
///
/// # Errors
///
/// - [`MarketError::InvalidAmount`] if `amount_out` is zero or would take
///   the whole output reserve.
/// - [`MarketError::EmptyPool`] if either reserve is zero.
/// - [`MarketError::Overflow`] if the required input exceeds `u128`.
pub fn input_for_output(amount_out: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if amount_out.is_zero() {
        return Err(MarketError::InvalidAmount("requested output must be positive"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(MarketError::EmptyPool);
    }
    if amount_out >= reserve_out {
        return Err(MarketError::InvalidAmount(
            "requested output must be below the reserve",
        ));
    }

    let remaining = reserve_out.safe_sub(&amount_out)?;
    let amount_in = mul_div(
        reserve_in.get(),
        amount_out.get(),
        remaining.get(),
        Rounding::Up,
    )?;
    Ok(Amount::new(amount_in))
}
