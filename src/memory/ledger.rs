//! Map-backed balance ledger.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, Asset};
use crate::error::{MarketError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::{BalanceLedger, Transfer};

/// Balances of both assets held in ordered maps, plus per-asset supply.
///
/// Zero balances are not stored, so two ledgers holding the same
/// non-zero balances compare equal.
///
/// # Example
///
/// ```rust
/// use term_market::domain::{AccountId, Amount, Asset};
/// use term_market::memory::InMemoryLedger;
/// use term_market::traits::BalanceLedger;
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let bob = AccountId::from_bytes([2u8; 32]);
/// let mut ledger = InMemoryLedger::new();
///
/// ledger.mint(Asset::Credit, &alice, Amount::new(100)).expect("mint");
/// ledger.transfer(Asset::Credit, &alice, &bob, Amount::new(40)).expect("transfer");
///
/// assert_eq!(ledger.balance_of(Asset::Credit, &alice), Amount::new(60));
/// assert_eq!(ledger.balance_of(Asset::Credit, &bob), Amount::new(40));
/// assert_eq!(ledger.total_supply(Asset::Credit), Amount::new(100));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: BTreeMap<(Asset, AccountId), Amount>,
    supply: BTreeMap<Asset, Amount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total amount of `asset` ever minted.
    pub fn total_supply(&self, asset: Asset) -> Amount {
        self.supply.get(&asset).copied().unwrap_or_default()
    }

    /// Iterates over the non-zero balances of `asset`.
    pub fn accounts(&self, asset: Asset) -> impl Iterator<Item = (&AccountId, &Amount)> {
        self.balances
            .iter()
            .filter(move |((a, _), _)| *a == asset)
            .map(|((_, account), amount)| (account, amount))
    }

    fn set_balance(&mut self, asset: Asset, account: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(asset, account));
        } else {
            self.balances.insert((asset, account), amount);
        }
    }
}

impl BalanceLedger for InMemoryLedger {
    fn balance_of(&self, asset: Asset, account: &AccountId) -> Amount {
        self.balances
            .get(&(asset, *account))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(
        &mut self,
        asset: Asset,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<()> {
        let from_balance = self.balance_of(asset, from);
        if from_balance < amount {
            return Err(MarketError::InsufficientBalance(
                "transfer exceeds source balance",
            ));
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(asset, to).safe_add(&amount)?;
        let from_balance = from_balance.safe_sub(&amount)?;
        self.set_balance(asset, *from, from_balance);
        self.set_balance(asset, *to, to_balance);
        Ok(())
    }

    fn mint(&mut self, asset: Asset, to: &AccountId, amount: Amount) -> Result<()> {
        let supply = self.total_supply(asset).safe_add(&amount)?;
        let balance = self.balance_of(asset, to).safe_add(&amount)?;
        self.supply.insert(asset, supply);
        self.set_balance(asset, *to, balance);
        Ok(())
    }

    /// Applies the legs against a scratch copy and swaps it in on success.
    fn settle(&mut self, legs: &[Transfer]) -> Result<()> {
        let mut scratch = self.balances.clone();
        for leg in legs {
            let from_key = (leg.asset, leg.from);
            let to_key = (leg.asset, leg.to);
            let from_balance = scratch.get(&from_key).copied().unwrap_or_default();
            if from_balance < leg.amount {
                return Err(MarketError::InsufficientBalance(
                    "settlement leg exceeds source balance",
                ));
            }
            if leg.from == leg.to {
                continue;
            }
            let to_balance = scratch
                .get(&to_key)
                .copied()
                .unwrap_or_default()
                .safe_add(&leg.amount)?;
            let from_balance = from_balance.safe_sub(&leg.amount)?;
            for (key, value) in [(from_key, from_balance), (to_key, to_balance)] {
                if value.is_zero() {
                    scratch.remove(&key);
                } else {
                    scratch.insert(key, value);
                }
            }
        }
        self.balances = scratch;
        Ok(())
    }
}
