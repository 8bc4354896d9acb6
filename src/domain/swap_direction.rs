//! Direction of a pool swap.

use core::fmt;

use super::Asset;

/// Which way a swap crosses the pool.
///
/// # Examples
///
/// ```
/// use term_market::domain::{Asset, SwapDirection};
///
/// let buy = SwapDirection::StableForCredit;
/// assert_eq!(buy.asset_in(), Asset::Stable);
/// assert_eq!(buy.asset_out(), Asset::Credit);
/// assert_eq!(buy.reverse(), SwapDirection::CreditForStable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapDirection {
    /// Pay stablecoin, receive meal-credits (buy).
    StableForCredit,
    /// Pay meal-credits, receive stablecoin (sell).
    CreditForStable,
}

impl SwapDirection {
    /// The asset the caller pays into the pool.
    #[must_use]
    pub const fn asset_in(&self) -> Asset {
        match self {
            Self::StableForCredit => Asset::Stable,
            Self::CreditForStable => Asset::Credit,
        }
    }

    /// The asset the pool pays out.
    #[must_use]
    pub const fn asset_out(&self) -> Asset {
        self.asset_in().other()
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reverse(&self) -> Self {
        match self {
            Self::StableForCredit => Self::CreditForStable,
            Self::CreditForStable => Self::StableForCredit,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.asset_in(), self.asset_out())
    }
}
