//! Market configuration.
//!
//! [`MarketConfig`] is the declarative blueprint of a term market: who
//! administers it, which ledger account backs the pool, the fixed-point
//! scale and the meal-block price.  It can be built in code or loaded
//! from TOML.

mod market_config;

pub use market_config::{ConfigError, MarketConfig, DEFAULT_MEAL_BLOCK_UNITS};
