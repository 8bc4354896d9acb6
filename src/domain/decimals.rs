//! Fixed-point scale shared by both market assets.

use serde::{Deserialize, Serialize};

use crate::error::MarketError;

const MAX_DECIMALS: u8 = 18;

/// Number of fractional digits carried by raw [`Amount`](super::Amount)s.
///
/// Meal-credits and the simulated stablecoin share one scale; the
/// default is 18 digits.  Construction rejects values above 18.
///
/// # Examples
///
/// ```
/// use term_market::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.scale_up(2), 2_000_000);
/// assert_eq!(Decimals::default(), Decimals::EIGHTEEN);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::EIGHTEEN
    }
}

impl Decimals {
    /// Whole units, no fractional digits.
    pub const ZERO: Self = Self(0);

    /// Eighteen fractional digits, the market default.
    pub const EIGHTEEN: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidConfiguration`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, MarketError> {
        if value > MAX_DECIMALS {
            return Err(MarketError::InvalidConfiguration("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Converts whole units to raw units.
    ///
    /// Cannot overflow: `u64::MAX × 10^18 < u128::MAX`.
    #[must_use]
    pub const fn scale_up(&self, units: u64) -> u128 {
        (units as u128) * self.factor()
    }

    /// Returns `10^decimals`.
    #[must_use]
    pub const fn factor(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }
}

impl TryFrom<u8> for Decimals {
    type Error = MarketError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
