//! Notifications published to the event sink.

use core::fmt;

use super::{AccountId, Amount, Asset, Shares, SwapDirection};

/// Something observers may want to know about.
///
/// Emission is fire-and-forget: no control flow depends on a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketEvent {
    /// The administrator opened the secondary market.
    MarketOpened {
        /// Term number started by this opening (1-based).
        term: u32,
    },
    /// The administrator closed the secondary market.
    MarketClosed {
        /// Term that just ended.
        term: u32,
    },
    /// Meal blocks were bought at the fixed rate.
    MealBlocksPurchased {
        /// Buyer.
        account: AccountId,
        /// Receiving vendor.
        vendor: AccountId,
        /// Meal-credits moved.
        amount: Amount,
        /// Blocks bought.
        count: u64,
    },
    /// Liquidity was deposited.
    LiquidityAdded {
        /// Depositor.
        account: AccountId,
        /// Stablecoin deposited.
        stable: Amount,
        /// Meal-credits deposited.
        credit: Amount,
        /// Shares minted.
        shares: Shares,
    },
    /// Liquidity was withdrawn.
    LiquidityRemoved {
        /// Withdrawer.
        account: AccountId,
        /// Stablecoin paid out.
        stable: Amount,
        /// Meal-credits paid out.
        credit: Amount,
        /// Shares burned.
        shares: Shares,
    },
    /// A swap executed against the pool.
    Swapped {
        /// Trader.
        account: AccountId,
        /// Direction of the trade.
        direction: SwapDirection,
        /// Amount paid in.
        amount_in: Amount,
        /// Amount paid out.
        amount_out: Amount,
    },
    /// The administrator credited an account.
    Disbursed {
        /// Credited account.
        to: AccountId,
        /// Asset minted.
        asset: Asset,
        /// Amount minted.
        amount: Amount,
    },
}

impl MarketEvent {
    /// Short stable name, used as the log message.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MarketOpened { .. } => "market_opened",
            Self::MarketClosed { .. } => "market_closed",
            Self::MealBlocksPurchased { .. } => "meal_blocks_purchased",
            Self::LiquidityAdded { .. } => "liquidity_added",
            Self::LiquidityRemoved { .. } => "liquidity_removed",
            Self::Swapped { .. } => "swapped",
            Self::Disbursed { .. } => "disbursed",
        }
    }
}

impl fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarketOpened { term } | Self::MarketClosed { term } => {
                write!(f, "{}(term={term})", self.name())
            }
            Self::MealBlocksPurchased {
                account,
                vendor,
                amount,
                count,
            } => write!(
                f,
                "{}({account} -> {vendor}, count={count}, amount={amount})",
                self.name()
            ),
            Self::LiquidityAdded {
                account,
                stable,
                credit,
                shares,
            }
            | Self::LiquidityRemoved {
                account,
                stable,
                credit,
                shares,
            } => write!(
                f,
                "{}({account}, stable={stable}, credit={credit}, shares={shares})",
                self.name()
            ),
            Self::Swapped {
                account,
                direction,
                amount_in,
                amount_out,
            } => write!(
                f,
                "{}({account}, {direction}, in={amount_in}, out={amount_out})",
                self.name()
            ),
            Self::Disbursed { to, asset, amount } => {
                write!(f, "{}({to}, {asset}={amount})", self.name())
            }
        }
    }
}
