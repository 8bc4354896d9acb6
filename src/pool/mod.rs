//! Reserve and share accounting for the stable/meal-credit pool.
//!
//! [`LiquidityPool`] holds the two reserve counters and the LP share
//! ledger.  It never touches balances: every operation is split into a
//! pure `stage_*` step that validates and computes the complete next
//! state, and an infallible [`LiquidityPool::commit`] that installs it.
//! The market settles the ledger between the two steps, so a failure at
//! any point leaves the pool untouched.
//!
//! # Invariants
//!
//! - `reserve_stable == 0 ⇔ reserve_credit == 0 ⇔ total_shares == 0`
//! - `Σ shares[holder] == total_shares`
//! - swaps never decrease `reserve_stable × reserve_credit`

mod liquidity;
pub mod swap;

#[cfg(test)]
mod proptest_properties;

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, Asset, Shares, SwapDirection, SwapResult, Withdrawal};
use crate::error::{MarketError, Result};
use crate::math::{full_product, CheckedArithmetic, U256};

pub use liquidity::{payout_for, shares_for_deposit};
pub use swap::{input_for_output, output_for_input};

/// A fully computed, not yet applied pool transition.
///
/// Produced by the `stage_*` methods and consumed by
/// [`LiquidityPool::commit`].  Holding one does not lock the pool; a
/// staged value is only meaningful against the state it was computed
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a staged transition does nothing until committed"]
pub struct Staged<T> {
    outcome: T,
    reserve_stable: Amount,
    reserve_credit: Amount,
    total_shares: Shares,
    holder: Option<(AccountId, Shares)>,
}

impl<T> Staged<T> {
    /// The value the operation returns once committed.
    pub const fn outcome(&self) -> &T {
        &self.outcome
    }

    /// Stable reserve after commit.
    pub const fn reserve_stable(&self) -> Amount {
        self.reserve_stable
    }

    /// Meal-credit reserve after commit.
    pub const fn reserve_credit(&self) -> Amount {
        self.reserve_credit
    }
    /// Outstanding LP shares after commit.
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }
}

/// Two-asset constant-product pool with an LP share ledger.
///
/// # Example
///
/// ```rust
/// use term_market::domain::{AccountId, Amount, Shares};
/// use term_market::pool::LiquidityPool;
///
/// let lp = AccountId::from_bytes([7u8; 32]);
/// let mut pool = LiquidityPool::new();
///
/// let staged = pool
///     .stage_deposit(lp, Amount::new(1_000), Amount::new(100_000))
///     .expect("valid deposit");
/// let minted = pool.commit(staged);
///
/// assert_eq!(minted, Shares::new(10_000));
/// assert_eq!(pool.shares_of(&lp), minted);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiquidityPool {
    reserve_stable: Amount,
    reserve_credit: Amount,
    total_shares: Shares,
    holders: BTreeMap<AccountId, Shares>,
}

impl LiquidityPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stablecoin reserve.
    pub const fn reserve_stable(&self) -> Amount {
        self.reserve_stable
    }

    /// Returns the meal-credit reserve.
    pub const fn reserve_credit(&self) -> Amount {
        self.reserve_credit
    }

    /// Returns the reserve of `asset`.
    pub const fn reserve(&self, asset: Asset) -> Amount {
        match asset {
            Asset::Stable => self.reserve_stable,
            Asset::Credit => self.reserve_credit,
        }
    }

    /// Returns the outstanding share supply.
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Returns the shares held by `account`.
    pub fn shares_of(&self, account: &AccountId) -> Shares {
        self.holders.get(account).copied().unwrap_or_default()
    }

    /// Iterates over every account holding a non-zero share balance.
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, &Shares)> {
        self.holders.iter()
    }

    /// Returns `true` if the pool holds no reserves and no shares.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_shares.is_zero()
    }

    /// Returns `reserve_stable × reserve_credit` at full width.
    #[must_use]
    pub fn invariant(&self) -> U256 {
        full_product(self.reserve_stable.get(), self.reserve_credit.get())
    }

    /// Checks the emptiness and share-conservation invariants.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let empty = [
            self.reserve_stable.is_zero(),
            self.reserve_credit.is_zero(),
            self.total_shares.is_zero(),
        ];
        if empty.iter().any(|e| *e) && !empty.iter().all(|e| *e) {
            return false;
        }
        let sum = self
            .holders
            .values()
            .try_fold(0u128, |acc, s| acc.checked_add(s.get()));
        sum == Some(self.total_shares.get())
    }

    /// Validates a deposit and computes the resulting state.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InvalidAmount`] if either amount is zero.
    /// - [`MarketError::ZeroLiquidityMinted`] if no share would be minted.
    /// - [`MarketError::Overflow`] if a reserve or share counter overflows.
    pub fn stage_deposit(
        &self,
        account: AccountId,
        stable: Amount,
        credit: Amount,
    ) -> Result<Staged<Shares>> {
        if stable.is_zero() {
            return Err(MarketError::InvalidAmount("stable deposit must be positive"));
        }
        if credit.is_zero() {
            return Err(MarketError::InvalidAmount("credit deposit must be positive"));
        }

        let minted = shares_for_deposit(
            stable,
            credit,
            self.reserve_stable,
            self.reserve_credit,
            self.total_shares,
        )?;
        if minted.is_zero() {
            return Err(MarketError::ZeroLiquidityMinted);
        }

        let reserve_stable = self.reserve_stable.safe_add(&stable)?;
        let reserve_credit = self.reserve_credit.safe_add(&credit)?;
        let total_shares = self.total_shares.safe_add(&minted)?;
        let holder_shares = self.shares_of(&account).safe_add(&minted)?;

        Ok(Staged {
            outcome: minted,
            reserve_stable,
            reserve_credit,
            total_shares,
            holder: Some((account, holder_shares)),
        })
    }

    /// Validates a withdrawal and computes the resulting state.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InvalidAmount`] if `shares` is zero.
    /// - [`MarketError::InsufficientBalance`] if `account` holds fewer shares.
    /// - [`MarketError::ZeroLiquidityBurned`] if either payout floors to zero.
    pub fn stage_withdrawal(&self, account: AccountId, shares: Shares) -> Result<Staged<Withdrawal>> {
        if shares.is_zero() {
            return Err(MarketError::InvalidAmount("share amount must be positive"));
        }
        let held = self.shares_of(&account);
        if shares > held {
            return Err(MarketError::InsufficientBalance(
                "share amount exceeds holder balance",
            ));
        }

        let (stable_out, credit_out) = payout_for(
            shares,
            self.reserve_stable,
            self.reserve_credit,
            self.total_shares,
        )?;
        if stable_out.is_zero() || credit_out.is_zero() {
            return Err(MarketError::ZeroLiquidityBurned);
        }

        let reserve_stable = self.reserve_stable.safe_sub(&stable_out)?;
        let reserve_credit = self.reserve_credit.safe_sub(&credit_out)?;
        let total_shares = self.total_shares.safe_sub(&shares)?;
        let holder_shares = held.safe_sub(&shares)?;

        Ok(Staged {
            outcome: Withdrawal::new(shares, stable_out, credit_out),
            reserve_stable,
            reserve_credit,
            total_shares,
            holder: Some((account, holder_shares)),
        })
    }

    /// Prices a swap and computes the resulting reserves.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InvalidAmount`] if `amount_in` is zero.
    /// - [`MarketError::EmptyPool`] if the pool is not seeded.
    /// - [`MarketError::InsufficientOutput`] if the output floors to zero.
    /// - [`MarketError::Overflow`] if the input reserve overflows.
    pub fn stage_swap(&self, direction: SwapDirection, amount_in: Amount) -> Result<Staged<SwapResult>> {
        let reserve_in = self.reserve(direction.asset_in());
        let reserve_out = self.reserve(direction.asset_out());

        let amount_out = output_for_input(amount_in, reserve_in, reserve_out)?;
        let result = SwapResult::new(direction, amount_in, amount_out)?;

        let next_in = reserve_in.safe_add(&amount_in)?;
        let next_out = reserve_out.safe_sub(&amount_out)?;

        let (reserve_stable, reserve_credit) = match direction {
            SwapDirection::StableForCredit => (next_in, next_out),
            SwapDirection::CreditForStable => (next_out, next_in),
        };

        Ok(Staged {
            outcome: result,
            reserve_stable,
            reserve_credit,
            total_shares: self.total_shares,
            holder: None,
        })
    }

    /// Installs a staged transition and returns its outcome.
    pub fn commit<T>(&mut self, staged: Staged<T>) -> T {
        self.reserve_stable = staged.reserve_stable;
        self.reserve_credit = staged.reserve_credit;
        self.total_shares = staged.total_shares;
        if let Some((account, shares)) = staged.holder {
            if shares.is_zero() {
                self.holders.remove(&account);
            } else {
                self.holders.insert(account, shares);
            }
        }
        debug_assert!(self.is_consistent(), "pool invariants violated after commit");
        staged.outcome
    }
}
