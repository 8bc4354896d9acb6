//! Raw balance amount with checked arithmetic.

use core::fmt;

/// A raw balance in the smallest unit of either market asset.
///
/// Meal-credits and the simulated stablecoin share the same fixed-point
/// scale (see [`Decimals`](super::Decimals)).  `Amount` itself never
/// interprets that scale; it is an unsigned `u128` counter with checked
/// arithmetic that returns `None` instead of wrapping or panicking.
///
/// # Examples
///
/// ```
/// use term_market::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(a.checked_sub(&b), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}
