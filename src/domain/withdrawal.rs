//! Payout of a liquidity withdrawal.

use core::fmt;

use super::{Amount, Shares};

/// Both assets returned when LP shares are burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Withdrawal {
    shares_burned: Shares,
    stable: Amount,
    credit: Amount,
}

impl Withdrawal {
    /// Creates a new withdrawal receipt.
    pub const fn new(shares_burned: Shares, stable: Amount, credit: Amount) -> Self {
        Self {
            shares_burned,
            stable,
            credit,
        }
    }

    /// Shares burned by the withdrawal.
    pub const fn shares_burned(&self) -> Shares {
        self.shares_burned
    }

    /// Stablecoin paid out.
    pub const fn stable(&self) -> Amount {
        self.stable
    }

    /// Meal-credits paid out.
    pub const fn credit(&self) -> Amount {
        self.credit
    }
}

impl fmt::Display for Withdrawal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Withdrawal(shares={}, stable={}, credit={})",
            self.shares_burned, self.stable, self.credit
        )
    }
}
