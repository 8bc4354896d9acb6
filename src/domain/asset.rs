//! The two balances traded by the market.

use core::fmt;

/// One of the two fungible balances held in the ledger.
///
/// # Examples
///
/// ```
/// use term_market::domain::Asset;
///
/// assert_eq!(Asset::Stable.other(), Asset::Credit);
/// assert_eq!(Asset::Credit.to_string(), "meal-credit");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    /// The simulated stablecoin.
    Stable,
    /// The meal-credit token.
    Credit,
}

impl Asset {
    /// Both assets, stable first.
    pub const ALL: [Self; 2] = [Self::Stable, Self::Credit];

    /// Returns the opposite side of the pool.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Stable => Self::Credit,
            Self::Credit => Self::Stable,
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => f.write_str("stable"),
            Self::Credit => f.write_str("meal-credit"),
        }
    }
}
