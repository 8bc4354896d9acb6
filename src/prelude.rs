//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use term_market::prelude::*;
//! ```
//!
//! Brings the market aggregate, its configuration, the domain types, the
//! collaborator traits with their in-memory implementations, and the
//! error types into scope in one import.

pub use crate::config::{ConfigError, MarketConfig};
pub use crate::domain::{
    AccountId, Amount, Asset, Decimals, MarketEvent, Shares, SwapDirection, SwapResult,
    Withdrawal,
};
pub use crate::error::{MarketError, Result};
pub use crate::gate::MarketGate;
pub use crate::market::{PoolSnapshot, TermMarket};
pub use crate::memory::{InMemoryLedger, RecordingSink, SingleAdministrator, TracingSink};
pub use crate::pool::LiquidityPool;
pub use crate::traits::{AccessControl, BalanceLedger, EventSink, FromConfig};
