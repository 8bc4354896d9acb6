//! Value types shared by every part of the market.
//!
//! Amounts, shares, account ids and the receipts returned by pool
//! operations.  Newtypes with checked arithmetic keep the two assets and
//! LP shares from being mixed up.

mod account_id;
mod amount;
mod asset;
mod decimals;
mod market_event;
mod shares;
mod swap_direction;
mod swap_result;
mod withdrawal;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset::Asset;
pub use decimals::Decimals;
pub use market_event::MarketEvent;
pub use shares::Shares;
pub use swap_direction::SwapDirection;
pub use swap_result::SwapResult;
pub use withdrawal::Withdrawal;
