//! Outcome of a committed swap.

use core::fmt;

use super::{Amount, SwapDirection};
use crate::error::MarketError;

/// Amounts exchanged by a swap.
///
/// # Invariants
///
/// `amount_in > 0` and `amount_out > 0`.  No fee field exists: the only
/// value the pool keeps is the floor-division remainder.
///
/// # Examples
///
/// ```
/// use term_market::domain::{Amount, SwapDirection, SwapResult};
///
/// let r = SwapResult::new(SwapDirection::StableForCredit, Amount::new(20), Amount::new(1_960));
/// assert!(r.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapResult {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult`.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InvalidAmount`] if `amount_in` is zero.
    /// - [`MarketError::InsufficientOutput`] if `amount_out` is zero.
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(MarketError::InvalidAmount("swap input must be positive"));
        }
        if amount_out.is_zero() {
            return Err(MarketError::InsufficientOutput);
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
        })
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({}: in={}, out={})",
            self.direction, self.amount_in, self.amount_out
        )
    }
}
