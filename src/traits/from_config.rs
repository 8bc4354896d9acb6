//! Construction from a validated [`MarketConfig`](crate::config::MarketConfig).
//!
//! Implementors must validate the configuration before building
//! anything; a successfully constructed value is always in a valid
//! initial state.

use crate::error::MarketError;

/// Builds `Self` from configuration `C`.
pub trait FromConfig<C>: Sized {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidConfiguration`] (or another variant
    /// reported by the config's own validation) if `config` is invalid.
    fn from_config(config: &C) -> Result<Self, MarketError>;
}
