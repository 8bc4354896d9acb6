//! Administrator predicate guarding restricted operations.

use crate::domain::AccountId;
use crate::error::{MarketError, Result};

/// Decides which callers may open or close the market and disburse
/// balances.
pub trait AccessControl {
    /// Returns `true` if `account` is an administrator.
    #[must_use]
    fn is_administrator(&self, account: &AccountId) -> bool;

    /// Fails with [`MarketError::Unauthorized`] for non-administrators.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Unauthorized`] if `caller` is not an
    /// administrator.
    fn ensure_administrator(&self, caller: &AccountId) -> Result<()> {
        if self.is_administrator(caller) {
            Ok(())
        } else {
            Err(MarketError::Unauthorized)
        }
    }
}
