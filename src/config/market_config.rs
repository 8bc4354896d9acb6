//! Configuration for a term market.

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::domain::{AccountId, Amount, Decimals};
use crate::error::MarketError;

/// Meal-block price in whole meal-credits when none is configured.
pub const DEFAULT_MEAL_BLOCK_UNITS: u64 = 1_500;

/// Immutable parameters of a term market.
///
/// # Fields
///
/// - `administrator`: the account allowed to open/close the gate and
///   disburse balances when the built-in [`SingleAdministrator`] access
///   control is used.
/// - `pool_account`: the ledger account holding the assets that back the
///   pool reserves.
/// - `decimals`: fixed-point scale of both assets (default 18).
/// - `meal_block_cost`: raw meal-credits charged per meal block on the
///   fixed-price path (default 1 500 whole units at `decimals`).
///
/// # Validation
///
/// - `administrator` and `pool_account` must be set and distinct.
/// - `meal_block_cost` must be non-zero.
///
/// # TOML
///
/// [`MarketConfig::from_toml_str`] reads the same fields; the meal-block
/// cost there is given in whole units and scaled by `decimals`:
///
/// ```
/// use term_market::config::MarketConfig;
///
/// let toml = format!(
///     "administrator = \"0x{}\"\npool_account = \"0x{}\"\nmeal_block_cost = 12\ndecimals = 2\n",
///     "01".repeat(32),
///     "02".repeat(32),
/// );
/// let cfg = MarketConfig::from_toml_str(&toml).expect("valid config");
/// assert_eq!(cfg.meal_block_cost().get(), 1_200);
/// ```
///
/// [`SingleAdministrator`]: crate::memory::SingleAdministrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    administrator: AccountId,
    pool_account: AccountId,
    decimals: Decimals,
    meal_block_cost: Amount,
}

impl MarketConfig {
    /// Creates a config with the default 18-decimal scale and a meal-block
    /// cost of [`DEFAULT_MEAL_BLOCK_UNITS`] whole meal-credits.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidConfiguration`] if validation fails.
    pub fn new(administrator: AccountId, pool_account: AccountId) -> Result<Self, MarketError> {
        let decimals = Decimals::default();
        let config = Self {
            administrator,
            pool_account,
            decimals,
            meal_block_cost: Amount::new(decimals.scale_up(DEFAULT_MEAL_BLOCK_UNITS)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the raw meal-block cost.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidConfiguration`] if `cost` is zero.
    pub fn with_meal_block_cost(mut self, cost: Amount) -> Result<Self, MarketError> {
        self.meal_block_cost = cost;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the decimal scale, keeping the raw meal-block cost.
    #[must_use]
    pub const fn with_decimals(mut self, decimals: Decimals) -> Self {
        self.decimals = decimals;
        self
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Parse`] for malformed TOML or unknown fields.
    /// - [`ConfigError::Invalid`] if the values fail validation.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: RawMarketConfig = toml::from_str(input)?;
        Ok(Self::from_raw(raw)?)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidConfiguration`] describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.administrator.is_zero() {
            return Err(MarketError::InvalidConfiguration("administrator is unset"));
        }
        if self.pool_account.is_zero() {
            return Err(MarketError::InvalidConfiguration("pool account is unset"));
        }
        if self.administrator == self.pool_account {
            return Err(MarketError::InvalidConfiguration(
                "pool account must differ from the administrator",
            ));
        }
        if self.meal_block_cost.is_zero() {
            return Err(MarketError::InvalidConfiguration(
                "meal block cost must be positive",
            ));
        }
        Ok(())
    }

    /// Returns the administrator account.
    #[must_use]
    pub const fn administrator(&self) -> AccountId {
        self.administrator
    }

    /// Returns the pool holding account.
    #[must_use]
    pub const fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Returns the fixed-point scale.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns the raw meal-credit cost of one meal block.
    pub const fn meal_block_cost(&self) -> Amount {
        self.meal_block_cost
    }
}

/// On-disk shape of [`MarketConfig`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMarketConfig {
    administrator: AccountId,
    pool_account: AccountId,
    #[serde(default)]
    decimals: Decimals,
    #[serde(default = "default_meal_block_units")]
    meal_block_cost: u64,
}

const fn default_meal_block_units() -> u64 {
    DEFAULT_MEAL_BLOCK_UNITS
}

impl MarketConfig {
    fn from_raw(raw: RawMarketConfig) -> Result<Self, MarketError> {
        let config = Self {
            administrator: raw.administrator,
            pool_account: raw.pool_account,
            decimals: raw.decimals,
            meal_block_cost: Amount::new(raw.decimals.scale_up(raw.meal_block_cost)),
        };
        config.validate()?;
        Ok(config)
    }
}

impl<'de> Deserialize<'de> for MarketConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMarketConfig::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}

/// Failure to load a [`MarketConfig`] from text.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML for this schema.
    #[error("failed to parse market config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but its values are invalid.
    #[error(transparent)]
    Invalid(#[from] MarketError),
}
