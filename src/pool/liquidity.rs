//! Share issuance and redemption math.
//!
//! # Deposit
//!
//! ```text
//! first deposit:  minted = ⌊ √(stable × credit) ⌋
//! otherwise:      minted = min(⌊stable × S / Rs⌋, ⌊credit × S / Rc⌋)
//! ```
//!
//! where `S` is the outstanding share supply.  A deposit off the current
//! ratio is credited at the scarcer side; the excess of the other side
//! stays in the pool.
//!
//! # Withdrawal
//!
//! ```text
//! stable_out = ⌊ shares × Rs / S ⌋
//! credit_out = ⌊ shares × Rc / S ⌋
//! ```

use crate::domain::{Amount, Shares};
use crate::error::{MarketError, Result};
use crate::math::{mul_div, sqrt_product, Rounding};

/// Shares minted for depositing `(stable, credit)`.
///
/// Returns [`Shares::ZERO`] when the deposit is too small; the caller
/// decides how to report that.
///
/// # Errors
///
/// Returns [`MarketError::Overflow`] if a ratio exceeds `u128`.
pub fn shares_for_deposit(
    stable: Amount,
    credit: Amount,
    reserve_stable: Amount,
    reserve_credit: Amount,
    total_shares: Shares,
) -> Result<Shares> {
    if total_shares.is_zero() {
        return Ok(Shares::new(sqrt_product(stable.get(), credit.get())));
    }
    if reserve_stable.is_zero() || reserve_credit.is_zero() {
        return Err(MarketError::EmptyPool);
    }

    let by_stable = mul_div(
        stable.get(),
        total_shares.get(),
        reserve_stable.get(),
        Rounding::Down,
    )?;
    let by_credit = mul_div(
        credit.get(),
        total_shares.get(),
        reserve_credit.get(),
        Rounding::Down,
    )?;
    Ok(Shares::new(core::cmp::min(by_stable, by_credit)))
}

/// Stable and credit paid out for burning `shares`.
///
/// # Errors
///
/// - [`MarketError::DivisionByZero`] if `total_shares` is zero.
/// - [`MarketError::Overflow`] if a payout exceeds `u128`.
pub fn payout_for(
    shares: Shares,
    reserve_stable: Amount,
    reserve_credit: Amount,
    total_shares: Shares,
) -> Result<(Amount, Amount)> {
    let stable = mul_div(
        shares.get(),
        reserve_stable.get(),
        total_shares.get(),
        Rounding::Down,
    )?;
    let credit = mul_div(
        shares.get(),
        reserve_credit.get(),
        total_shares.get(),
        Rounding::Down,
    )?;
    Ok((Amount::new(stable), Amount::new(credit)))
}
