//! Administrator predicates.

use std::collections::BTreeSet;

use crate::config::MarketConfig;
use crate::domain::AccountId;
use crate::error::{MarketError, Result};
use crate::traits::{AccessControl, FromConfig};

/// Exactly one administrator, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleAdministrator {
    administrator: AccountId,
}

impl SingleAdministrator {
    /// Creates the predicate for `administrator`.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::ZeroAddress`] for the unset account.
    pub fn new(administrator: AccountId) -> Result<Self> {
        administrator.ensure_set()?;
        Ok(Self { administrator })
    }

    /// The administrator account.
    #[must_use]
    pub const fn administrator(&self) -> AccountId {
        self.administrator
    }
}

impl AccessControl for SingleAdministrator {
    fn is_administrator(&self, account: &AccountId) -> bool {
        *account == self.administrator
    }
}

impl FromConfig<MarketConfig> for SingleAdministrator {
    fn from_config(config: &MarketConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.administrator())
    }
}

/// Any number of administrators.  An empty set authorizes nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdministratorSet {
    members: BTreeSet<AccountId>,
}

impl AdministratorSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `account`. Returns `false` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::ZeroAddress`] for the unset account.
    pub fn grant(&mut self, account: AccountId) -> Result<bool> {
        account.ensure_set()?;
        Ok(self.members.insert(account))
    }

    /// Removes `account`. Returns `false` if it was not present.
    pub fn revoke(&mut self, account: &AccountId) -> bool {
        self.members.remove(account)
    }

    /// Number of administrators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nobody is authorized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl AccessControl for AdministratorSet {
    fn is_administrator(&self, account: &AccountId) -> bool {
        self.members.contains(account)
    }
}

impl FromConfig<MarketConfig> for AdministratorSet {
    fn from_config(config: &MarketConfig) -> Result<Self> {
        config.validate()?;
        let mut set = Self::new();
        set.grant(config.administrator())?;
        Ok(set)
    }
}
