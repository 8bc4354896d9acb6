//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning checked operations
//! on [`Amount`] and [`Shares`] into [`Result`](crate::error::Result)s
//! carrying a specific [`MarketError`] variant.
//!
//! # Examples
//!
//! ```
//! use term_market::domain::Amount;
//! use term_market::math::CheckedArithmetic;
//!
//! assert!(Amount::new(100).safe_add(&Amount::new(200)).is_ok());
//! assert!(Amount::new(1).safe_sub(&Amount::new(2)).is_err());
//! ```

use crate::domain::{Amount, Shares};
use crate::error::MarketError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No saturation**: overflow and underflow are reported, never clamped.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Overflow`] if the result exceeds `u128`.
    fn safe_add(&self, other: &Self) -> Result<Self, MarketError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, MarketError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, MarketError> {
        self.checked_add(other)
            .ok_or(MarketError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, MarketError> {
        self.checked_sub(other)
            .ok_or(MarketError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, MarketError> {
        self.checked_add(other)
            .ok_or(MarketError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, MarketError> {
        self.checked_sub(other)
            .ok_or(MarketError::Underflow("share subtraction underflow"))
    }
}
