//! Which way a truncated quotient moves.
//!
//! Every division in the pool rounds against the caller, so any dust stays
//! in the reserves:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal payout, minted shares | [`Rounding::Down`] |
//! | Quoted input for a desired output | [`Rounding::Up`] |

use super::wide::U256;

/// Rounding direction passed to [`mul_div`](super::mul_div).
///
/// # Examples
///
/// ```
/// use term_market::math::{mul_div, Rounding};
///
/// assert_eq!(mul_div(10, 1, 3, Rounding::Down), Ok(3));
/// assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Ceiling. Used for quoted inputs.
    Up,
    /// Floor. Used for every payout.
    Down,
}

impl Rounding {
    /// Applies this direction to a quotient given the remainder of the
    /// same division.
    ///
    /// Returns `None` only if rounding up would pass `U256::MAX`.
    #[must_use]
    pub(crate) fn settle_quotient(self, quotient: U256, remainder: U256) -> Option<U256> {
        match self {
            Self::Up if !remainder.is_zero() => quotient.checked_add(U256::one()),
            Self::Up | Self::Down => Some(quotient),
        }
    }
}
