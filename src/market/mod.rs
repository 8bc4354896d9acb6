//! The term market aggregate.
//!
//! [`TermMarket`] owns the gate and the pool, and drives the injected
//! [`BalanceLedger`], [`AccessControl`] and [`EventSink`].  Every entry
//! operation takes `&mut self` and is one indivisible transition:
//!
//! 1. check the caller and the gate,
//! 2. check amounts and balances,
//! 3. stage the new pool state,
//! 4. settle the ledger legs atomically,
//! 5. commit the staged state and emit the event.
//!
//! A failure in steps 1–4 leaves reserves, shares, balances and the gate
//! exactly as they were.

mod snapshot;

use tracing::{debug, info};

use crate::config::MarketConfig;
use crate::domain::{
    AccountId, Amount, Asset, MarketEvent, Shares, SwapDirection, SwapResult, Withdrawal,
};
use crate::error::{MarketError, Result};
use crate::gate::MarketGate;
use crate::memory::{InMemoryLedger, RecordingSink, SingleAdministrator};
use crate::pool::{input_for_output, output_for_input, LiquidityPool};
use crate::traits::{AccessControl, BalanceLedger, EventSink, FromConfig, Transfer};

pub use snapshot::PoolSnapshot;

/// Term-gated constant-product market between a simulated stablecoin
/// and meal-credits.
///
/// # Example
///
/// ```rust
/// use term_market::config::MarketConfig;
/// use term_market::domain::{AccountId, Amount};
/// use term_market::market::TermMarket;
/// use term_market::traits::FromConfig;
///
/// let admin = AccountId::from_bytes([1u8; 32]);
/// let pool = AccountId::from_bytes([2u8; 32]);
/// let lp = AccountId::from_bytes([3u8; 32]);
///
/// let config = MarketConfig::new(admin, pool).expect("valid config");
/// let mut market = TermMarket::from_config(&config).expect("valid market");
///
/// market.credit_stable(&admin, &lp, Amount::new(1_020)).expect("disburse");
/// market.credit_tokens(&admin, &lp, Amount::new(100_000)).expect("disburse");
/// market.open(&admin).expect("open");
///
/// let shares = market
///     .add_liquidity(&lp, Amount::new(1_000), Amount::new(100_000))
///     .expect("seed");
/// assert_eq!(shares.get(), 10_000);
///
/// let trade = market.swap_stable_for_credit(&lp, Amount::new(20)).expect("swap");
/// assert_eq!(trade.amount_out(), Amount::new(1_960));
/// assert_eq!(market.reserve_credit(), Amount::new(98_040));
/// ```
#[derive(Debug, Clone)]
pub struct TermMarket<L = InMemoryLedger, A = SingleAdministrator, E = RecordingSink> {
    config: MarketConfig,
    gate: MarketGate,
    pool: LiquidityPool,
    ledger: L,
    access: A,
    sink: E,
}

impl FromConfig<MarketConfig> for TermMarket {
    fn from_config(config: &MarketConfig) -> Result<Self> {
        let access = SingleAdministrator::from_config(config)?;
        Self::with_collaborators(
            config.clone(),
            InMemoryLedger::new(),
            access,
            RecordingSink::new(),
        )
    }
}

impl<L, A, E> TermMarket<L, A, E>
where
    L: BalanceLedger,
    A: AccessControl,
    E: EventSink,
{
    /// Creates a closed market with an empty pool over the given
    /// collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn with_collaborators(config: MarketConfig, ledger: L, access: A, sink: E) -> Result<Self> {
        config.validate()?;
        debug!(
            pool_account = %config.pool_account(),
            meal_block_cost = %config.meal_block_cost(),
            "term market created"
        );
        Ok(Self {
            config,
            gate: MarketGate::new(),
            pool: LiquidityPool::new(),
            ledger,
            access,
            sink,
        })
    }

    // -- gate -----------------------------------------------------------------

    /// Opens the secondary market for a new term.
    ///
    /// # Errors
    ///
    /// - [`MarketError::Unauthorized`] if `caller` is not an administrator.
    /// - [`MarketError::AlreadyOpen`] if the market is open.
    pub fn open(&mut self, caller: &AccountId) -> Result<u32> {
        self.access
            .ensure_administrator(caller)
            .and_then(|()| self.gate.open())
            .map_err(|e| rejected("open", e))
            .map(|term| {
                info!(term, "secondary market opened");
                self.sink.emit(MarketEvent::MarketOpened { term });
                term
            })
    }

    /// Closes the secondary market, ending the current term.
    ///
    /// # Errors
    ///
    /// - [`MarketError::Unauthorized`] if `caller` is not an administrator.
    /// - [`MarketError::NotOpen`] if the market is closed.
    pub fn close(&mut self, caller: &AccountId) -> Result<u32> {
        self.access
            .ensure_administrator(caller)
            .and_then(|()| self.gate.close())
            .map_err(|e| rejected("close", e))
            .map(|term| {
                info!(term, "secondary market closed");
                self.sink.emit(MarketEvent::MarketClosed { term });
                term
            })
    }

    // -- liquidity ------------------------------------------------------------

    /// Deposits both assets and mints LP shares to `caller`.
    ///
    /// # Errors
    ///
    /// - [`MarketError::MarketClosed`] while the gate is closed.
    /// - [`MarketError::Unauthorized`] if `caller` is the pool account.
    /// - [`MarketError::InvalidAmount`] if either amount is zero.
    /// - [`MarketError::InsufficientBalance`] if `caller` cannot fund it.
    /// - [`MarketError::ZeroLiquidityMinted`] if the deposit mints nothing.
    pub fn add_liquidity(&mut self, caller: &AccountId, stable: Amount, credit: Amount) -> Result<Shares> {
        self.try_add_liquidity(caller, stable, credit)
            .map_err(|e| rejected("add_liquidity", e))
    }

    fn try_add_liquidity(&mut self, caller: &AccountId, stable: Amount, credit: Amount) -> Result<Shares> {
        self.gate.ensure_open()?;
        self.ensure_trader(caller)?;
        ensure_positive(stable, "stable deposit must be positive")?;
        ensure_positive(credit, "credit deposit must be positive")?;
        self.ensure_funds(Asset::Stable, caller, stable)?;
        self.ensure_funds(Asset::Credit, caller, credit)?;

        let staged = self.pool.stage_deposit(*caller, stable, credit)?;
        let pool_account = self.config.pool_account();
        self.ledger.settle(&[
            Transfer::new(Asset::Stable, *caller, pool_account, stable),
            Transfer::new(Asset::Credit, *caller, pool_account, credit),
        ])?;
        let shares = self.pool.commit(staged);

        debug!(
            account = %caller,
            %stable,
            %credit,
            %shares,
            reserve_stable = %self.pool.reserve_stable(),
            reserve_credit = %self.pool.reserve_credit(),
            "liquidity added"
        );
        self.sink.emit(MarketEvent::LiquidityAdded {
            account: *caller,
            stable,
            credit,
            shares,
        });
        Ok(shares)
    }

    /// Burns `shares` of `caller` and pays out both assets pro rata.
    ///
    /// # Errors
    ///
    /// - [`MarketError::MarketClosed`] while the gate is closed.
    /// - [`MarketError::Unauthorized`] if `caller` is the pool account.
    /// - [`MarketError::InvalidAmount`] if `shares` is zero.
    /// - [`MarketError::InsufficientBalance`] if `caller` holds fewer shares.
    /// - [`MarketError::ZeroLiquidityBurned`] if either payout is zero.
    pub fn remove_liquidity(&mut self, caller: &AccountId, shares: Shares) -> Result<Withdrawal> {
        self.try_remove_liquidity(caller, shares)
            .map_err(|e| rejected("remove_liquidity", e))
    }

    fn try_remove_liquidity(&mut self, caller: &AccountId, shares: Shares) -> Result<Withdrawal> {
        self.gate.ensure_open()?;
        self.ensure_trader(caller)?;

        let staged = self.pool.stage_withdrawal(*caller, shares)?;
        let receipt = *staged.outcome();
        let pool_account = self.config.pool_account();
        self.ledger.settle(&[
            Transfer::new(Asset::Stable, pool_account, *caller, receipt.stable()),
            Transfer::new(Asset::Credit, pool_account, *caller, receipt.credit()),
        ])?;
        let receipt = self.pool.commit(staged);

        debug!(
            account = %caller,
            shares = %receipt.shares_burned(),
            stable = %receipt.stable(),
            credit = %receipt.credit(),
            total_shares = %self.pool.total_shares(),
            "liquidity removed"
        );
        self.sink.emit(MarketEvent::LiquidityRemoved {
            account: *caller,
            stable: receipt.stable(),
            credit: receipt.credit(),
            shares: receipt.shares_burned(),
        });
        Ok(receipt)
    }

    // -- swaps ----------------------------------------------------------------

    /// Sells `stable_in` stablecoin to the pool for meal-credits.
    ///
    /// # Errors
    ///
    /// See [`TermMarket::swap`].
    pub fn swap_stable_for_credit(&mut self, caller: &AccountId, stable_in: Amount) -> Result<SwapResult> {
        self.swap(caller, SwapDirection::StableForCredit, stable_in)
    }

    /// Sells `credit_in` meal-credits to the pool for stablecoin.
    ///
    /// # Errors
    ///
    /// See [`TermMarket::swap`].
    pub fn swap_credit_for_stable(&mut self, caller: &AccountId, credit_in: Amount) -> Result<SwapResult> {
        self.swap(caller, SwapDirection::CreditForStable, credit_in)
    }

    /// Swaps `amount_in` of the direction's input asset at the
    /// constant-product price.
    ///
    /// # Errors
    ///
    /// - [`MarketError::MarketClosed`] while the gate is closed.
    /// - [`MarketError::Unauthorized`] if `caller` is the pool account.
    /// - [`MarketError::InvalidAmount`] if `amount_in` is zero.
    /// - [`MarketError::EmptyPool`] if the pool is not seeded.
    /// - [`MarketError::InsufficientBalance`] if `caller` cannot pay.
    /// - [`MarketError::InsufficientOutput`] if the output rounds to zero.
    pub fn swap(&mut self, caller: &AccountId, direction: SwapDirection, amount_in: Amount) -> Result<SwapResult> {
        self.try_swap(caller, direction, amount_in)
            .map_err(|e| rejected("swap", e))
    }

    fn try_swap(&mut self, caller: &AccountId, direction: SwapDirection, amount_in: Amount) -> Result<SwapResult> {
        self.gate.ensure_open()?;
        self.ensure_trader(caller)?;
        ensure_positive(amount_in, "swap input must be positive")?;
        if self.pool.is_empty() {
            return Err(MarketError::EmptyPool);
        }
        self.ensure_funds(direction.asset_in(), caller, amount_in)?;

        let staged = self.pool.stage_swap(direction, amount_in)?;
        let result = *staged.outcome();
        let pool_account = self.config.pool_account();
        self.ledger.settle(&[
            Transfer::new(direction.asset_in(), *caller, pool_account, result.amount_in()),
            Transfer::new(direction.asset_out(), pool_account, *caller, result.amount_out()),
        ])?;
        let result = self.pool.commit(staged);

        debug!(
            account = %caller,
            %direction,
            amount_in = %result.amount_in(),
            amount_out = %result.amount_out(),
            reserve_stable = %self.pool.reserve_stable(),
            reserve_credit = %self.pool.reserve_credit(),
            "swap executed"
        );
        self.sink.emit(MarketEvent::Swapped {
            account: *caller,
            direction,
            amount_in: result.amount_in(),
            amount_out: result.amount_out(),
        });
        Ok(result)
    }

    // -- quotes ---------------------------------------------------------------

    /// Meal-credits a swap of `stable_in` would pay right now.
    ///
    /// # Errors
    ///
    /// Same as [`TermMarket::swap`] except the balance check.
    pub fn quote_stable_for_credit(&self, stable_in: Amount) -> Result<Amount> {
        self.quote(SwapDirection::StableForCredit, stable_in)
    }

    /// Stablecoin a swap of `credit_in` would pay right now.
    ///
    /// # Errors
    ///
    /// Same as [`TermMarket::swap`] except the balance check.
    pub fn quote_credit_for_stable(&self, credit_in: Amount) -> Result<Amount> {
        self.quote(SwapDirection::CreditForStable, credit_in)
    }

    /// Output of swapping `amount_in` in `direction` against the current
    /// reserves.
    ///
    /// # Errors
    ///
    /// Same as [`TermMarket::swap`] except the caller checks.
    pub fn quote(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount> {
        self.gate.ensure_open()?;
        output_for_input(
            amount_in,
            self.pool.reserve(direction.asset_in()),
            self.pool.reserve(direction.asset_out()),
        )
    }

    /// Smallest input in `direction` that yields at least `amount_out`.
    ///
    /// # Errors
    ///
    /// - [`MarketError::MarketClosed`] while the gate is closed.
    /// - [`MarketError::InvalidAmount`] if `amount_out` is zero or not
    ///   below the output reserve.
    /// - [`MarketError::EmptyPool`] if the pool is not seeded.
    pub fn quote_input_for_output(&self, direction: SwapDirection, amount_out: Amount) -> Result<Amount> {
        self.gate.ensure_open()?;
        input_for_output(
            amount_out,
            self.pool.reserve(direction.asset_in()),
            self.pool.reserve(direction.asset_out()),
        )
    }

    // -- fixed-price path -----------------------------------------------------

    /// Buys `count` meal blocks from `vendor` at the configured fixed
    /// price.  Works whether or not the secondary market is open.
    ///
    /// Returns the meal-credits paid.
    ///
    /// # Errors
    ///
    /// - [`MarketError::InvalidAmount`] if `count` is zero.
    /// - [`MarketError::ZeroAddress`] if `vendor` is unset.
    /// - [`MarketError::Unauthorized`] if `caller` is the pool account.
    /// - [`MarketError::Overflow`] if the total cost exceeds `u128`.
    /// - [`MarketError::InsufficientBalance`] if `caller` cannot pay.
    pub fn purchase(&mut self, caller: &AccountId, vendor: &AccountId, count: u64) -> Result<Amount> {
        self.try_purchase(caller, vendor, count)
            .map_err(|e| rejected("purchase", e))
    }

    fn try_purchase(&mut self, caller: &AccountId, vendor: &AccountId, count: u64) -> Result<Amount> {
        if count == 0 {
            return Err(MarketError::InvalidAmount("meal block count must be positive"));
        }
        vendor.ensure_set()?;
        self.ensure_trader(caller)?;
        let cost = self
            .config
            .meal_block_cost()
            .checked_mul(&Amount::new(u128::from(count)))
            .ok_or(MarketError::Overflow("meal block cost overflow"))?;
        self.ensure_funds(Asset::Credit, caller, cost)?;
        self.ledger.transfer(Asset::Credit, caller, vendor, cost)?;

        info!(account = %caller, vendor = %vendor, count, %cost, "meal blocks purchased");
        self.sink.emit(MarketEvent::MealBlocksPurchased {
            account: *caller,
            vendor: *vendor,
            amount: cost,
            count,
        });
        Ok(cost)
    }

    // -- disbursement ---------------------------------------------------------

    /// Mints `amount` meal-credits to `to`.
    ///
    /// # Errors
    ///
    /// See [`TermMarket::disburse`].
    pub fn credit_tokens(&mut self, caller: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        self.disburse(caller, Asset::Credit, to, amount)
    }

    /// Mints `amount` simulated stablecoin to `to`.
    ///
    /// # Errors
    ///
    /// See [`TermMarket::disburse`].
    pub fn credit_stable(&mut self, caller: &AccountId, to: &AccountId, amount: Amount) -> Result<()> {
        self.disburse(caller, Asset::Stable, to, amount)
    }

    /// Mints `amount` of `asset` to `to`.
    ///
    /// # Errors
    ///
    /// - [`MarketError::Unauthorized`] if `caller` is not an administrator.
    /// - [`MarketError::ZeroAddress`] if `to` is unset.
    /// - [`MarketError::InvalidAmount`] if `amount` is zero.
    /// - [`MarketError::Overflow`] if the balance or supply overflows.
    pub fn disburse(&mut self, caller: &AccountId, asset: Asset, to: &AccountId, amount: Amount) -> Result<()> {
        self.try_disburse(caller, asset, to, amount)
            .map_err(|e| rejected("disburse", e))
    }

    fn try_disburse(&mut self, caller: &AccountId, asset: Asset, to: &AccountId, amount: Amount) -> Result<()> {
        self.access.ensure_administrator(caller)?;
        to.ensure_set()?;
        ensure_positive(amount, "disbursement must be positive")?;
        self.ledger.mint(asset, to, amount)?;

        debug!(to = %to, %asset, %amount, "balance disbursed");
        self.sink.emit(MarketEvent::Disbursed {
            to: *to,
            asset,
            amount,
        });
        Ok(())
    }

    // -- queries --------------------------------------------------------------

    /// Meal-credit balance of `account`.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.ledger.balance_of(Asset::Credit, account)
    }

    /// Simulated stablecoin balance of `account`.
    pub fn stable_balance_of(&self, account: &AccountId) -> Amount {
        self.ledger.balance_of(Asset::Stable, account)
    }

    /// LP shares held by `account`.
    pub fn shares_of(&self, account: &AccountId) -> Shares {
        self.pool.shares_of(account)
    }

    /// Stablecoin reserve.
    pub const fn reserve_stable(&self) -> Amount {
        self.pool.reserve_stable()
    }

    /// Meal-credit reserve.
    pub const fn reserve_credit(&self) -> Amount {
        self.pool.reserve_credit()
    }

    /// Outstanding LP shares.
    pub const fn total_shares(&self) -> Shares {
        self.pool.total_shares()
    }

    /// Whether the secondary market is open.
    #[must_use]
    pub const fn is_market_open(&self) -> bool {
        self.gate.is_open()
    }

    /// Current or most recent term number; `0` before the first opening.
    #[must_use]
    pub const fn term(&self) -> u32 {
        self.gate.term()
    }

    /// Every pool-level observable at once.
    #[must_use]
    pub const fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            reserve_stable: self.pool.reserve_stable(),
            reserve_credit: self.pool.reserve_credit(),
            total_shares: self.pool.total_shares(),
            market_open: self.gate.is_open(),
            term: self.gate.term(),
        }
    }

    /// The pool state, including the share holders.
    #[must_use]
    pub const fn pool(&self) -> &LiquidityPool {
        &self.pool
    }

    /// The configuration the market was built from.
    #[must_use]
    pub const fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// The balance ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The access-control collaborator.
    #[must_use]
    pub const fn access(&self) -> &A {
        &self.access
    }

    /// The event sink.
    #[must_use]
    pub const fn sink(&self) -> &E {
        &self.sink
    }

    /// Mutable access to the event sink, e.g. to drain recorded events.
    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    // -- guards ---------------------------------------------------------------

    /// The pool account's ledger balance backs the reserves; it may not
    /// trade against itself.
    fn ensure_trader(&self, caller: &AccountId) -> Result<()> {
        if *caller == self.config.pool_account() {
            return Err(MarketError::Unauthorized);
        }
        Ok(())
    }

    fn ensure_funds(&self, asset: Asset, account: &AccountId, needed: Amount) -> Result<()> {
        if self.ledger.balance_of(asset, account) < needed {
            return Err(MarketError::InsufficientBalance(match asset {
                Asset::Stable => "stable balance too low",
                Asset::Credit => "meal-credit balance too low",
            }));
        }
        Ok(())
    }
}

fn ensure_positive(amount: Amount, context: &'static str) -> Result<()> {
    if amount.is_zero() {
        return Err(MarketError::InvalidAmount(context));
    }
    Ok(())
}

fn rejected(operation: &'static str, error: MarketError) -> MarketError {
    debug!(operation, %error, "operation rejected");
    error
}
