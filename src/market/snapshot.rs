//! Point-in-time view of the pool.

use core::fmt;

use crate::domain::{Amount, Shares};

/// Every pool-level observable, read at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolSnapshot {
    /// Stablecoin reserve.
    pub reserve_stable: Amount,
    /// Meal-credit reserve.
    pub reserve_credit: Amount,
    /// Outstanding LP shares.
    pub total_shares: Shares,
    /// Whether the secondary market is open.
    pub market_open: bool,
    /// Current or most recent term number.
    pub term: u32,
}

impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PoolSnapshot(term={}, {}, stable={}, credit={}, shares={})",
            self.term,
            if self.market_open { "open" } else { "closed" },
            self.reserve_stable,
            self.reserve_credit,
            self.total_shares,
        )
    }
}
