//! Ledger capability the market core settles against.
//!
//! [`BalanceLedger`] holds the meal-credit balance and the parallel
//! stablecoin balance of every account.  The market never owns these
//! balances; it only validates against them and submits transfers.
//!
//! # Atomicity Contract
//!
//! A single [`BalanceLedger::transfer`] or [`BalanceLedger::mint`] either
//! applies fully or fails without effect.  Multi-leg operations (a swap
//! moves one asset in and the other out) go through
//! [`BalanceLedger::settle`], which must apply every leg or none.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, Asset};
use crate::error::{MarketError, Result};
use crate::math::CheckedArithmetic;

/// One leg of a settlement: move `amount` of `asset` from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transfer {
    /// Asset being moved.
    pub asset: Asset,
    /// Debited account.
    pub from: AccountId,
    /// Credited account.
    pub to: AccountId,
    /// Raw amount.
    pub amount: Amount,
}

impl Transfer {
    /// Creates a new transfer leg.
    #[must_use]
    pub const fn new(asset: Asset, from: AccountId, to: AccountId, amount: Amount) -> Self {
        Self {
            asset,
            from,
            to,
            amount,
        }
    }
}

/// Balance store for both market assets.
///
/// # Errors
///
/// Implementations report a debit the source cannot cover with
/// [`MarketError::InsufficientBalance`] and a credit that would exceed
/// `u128` with [`MarketError::Overflow`].
pub trait BalanceLedger {
    /// Returns the balance of `account` in `asset` (zero if unknown).
    #[must_use]
    fn balance_of(&self, asset: Asset, account: &AccountId) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InsufficientBalance`] if `from` holds less than `amount`.
    /// - [`MarketError::Overflow`] if the credit overflows `to`'s balance.
    fn transfer(
        &mut self,
        asset: Asset,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<()>;

    /// Creates `amount` of `asset` in `to`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::Overflow`] if the balance or supply overflows.
    fn mint(&mut self, asset: Asset, to: &AccountId, amount: Amount) -> Result<()>;

    /// Applies every leg or none.
    ///
    /// The provided implementation verifies up front that every debited
    /// account covers the sum of its debits and that no credited account
    /// overflows, then applies the legs in order.  Inflows from earlier
    /// legs are not counted towards later debits.
    ///
    /// # Errors
    ///
    /// Same as [`BalanceLedger::transfer`]; on error no leg has been applied.
    fn settle(&mut self, legs: &[Transfer]) -> Result<()> {
        let mut debits: BTreeMap<(Asset, AccountId), Amount> = BTreeMap::new();
        let mut credits: BTreeMap<(Asset, AccountId), Amount> = BTreeMap::new();
        for leg in legs {
            let debit = debits.entry((leg.asset, leg.from)).or_default();
            *debit = debit.safe_add(&leg.amount)?;
            let credit = credits.entry((leg.asset, leg.to)).or_default();
            *credit = credit.safe_add(&leg.amount)?;
        }
        for (&(asset, account), needed) in &debits {
            if self.balance_of(asset, &account) < *needed {
                return Err(MarketError::InsufficientBalance(
                    "settlement leg exceeds source balance",
                ));
            }
        }
        for (&(asset, account), incoming) in &credits {
            self.balance_of(asset, &account)
                .checked_add(incoming)
                .ok_or(MarketError::Overflow("settlement credit overflows balance"))?;
        }
        for leg in legs {
            self.transfer(leg.asset, &leg.from, &leg.to, leg.amount)?;
        }
        Ok(())
    }
}
