//! # Term Market
//!
//! A term-gated constant-product market between a simulated stablecoin
//! and meal-credits.
//!
//! An administrator opens the secondary market at the start of each
//! academic term and closes it at the end.  While it is open, any account
//! may supply or withdraw liquidity and swap between the two assets at
//! the constant-product price.  While it is closed, only the fixed-price
//! meal-block purchase path is available.
//!
//! The pool accounting (share issuance, proportional payout, swap
//! pricing and the gate) lives in this crate.  Balances, the
//! administrator predicate and event publishing are injected
//! collaborators; in-memory implementations ship in [`memory`].
//!
//! # Quick Start
//!
//! ```rust
//! use term_market::prelude::*;
//!
//! let admin = AccountId::from_bytes([1u8; 32]);
//! let pool = AccountId::from_bytes([2u8; 32]);
//! let student = AccountId::from_bytes([3u8; 32]);
//! let vendor = AccountId::from_bytes([4u8; 32]);
//!
//! // 1. Configure: 1500 raw meal-credits per meal block
//! let config = MarketConfig::new(admin, pool)
//!     .and_then(|c| c.with_meal_block_cost(Amount::new(1_500)))
//!     .expect("valid config");
//! let mut market = TermMarket::from_config(&config).expect("valid market");
//!
//! // 2. Fund the student
//! market.credit_tokens(&admin, &student, Amount::new(101_500)).expect("disburse");
//! market.credit_stable(&admin, &student, Amount::new(1_000)).expect("disburse");
//!
//! // 3. The purchase path works while the market is closed
//! let cost = market.purchase(&student, &vendor, 1).expect("purchase");
//! assert_eq!(cost, Amount::new(1_500));
//!
//! // 4. Liquidity needs an open market
//! assert_eq!(
//!     market.add_liquidity(&student, Amount::new(1_000), Amount::new(100_000)),
//!     Err(MarketError::MarketClosed)
//! );
//! market.open(&admin).expect("open");
//! let shares = market
//!     .add_liquidity(&student, Amount::new(1_000), Amount::new(100_000))
//!     .expect("seed");
//! assert_eq!(shares, Shares::new(10_000));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  TermMarket  │  entry operations, one atomic transition each
//! └──────┬───────┘
//!        │ gate check → balance check → stage → settle → commit
//!        ▼
//! ┌──────────────┐   ┌────────────────────────────────────────┐
//! │ MarketGate   │   │ BalanceLedger / AccessControl /        │
//! │ LiquidityPool│   │ EventSink (injected, see `memory`)     │
//! └──────┬───────┘   └────────────────────────────────────────┘
//!        │ share math, constant-product pricing
//!        ▼
//! ┌──────────────┐
//! │ Domain, Math │  Amount, Shares, AccountId, U256, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`market`] | [`TermMarket`](market::TermMarket) aggregate and [`PoolSnapshot`](market::PoolSnapshot) |
//! | [`pool`]   | [`LiquidityPool`](pool::LiquidityPool) reserves, shares and pricing |
//! | [`gate`]   | [`MarketGate`](gate::MarketGate) open/closed switch and term counter |
//! | [`traits`] | Collaborator capabilities: [`BalanceLedger`](traits::BalanceLedger), [`AccessControl`](traits::AccessControl), [`EventSink`](traits::EventSink), [`FromConfig`](traits::FromConfig) |
//! | [`memory`] | In-memory collaborators |
//! | [`config`] | [`MarketConfig`](config::MarketConfig) and TOML loading |
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AccountId`](domain::AccountId), etc. |
//! | [`math`]   | Checked arithmetic, rounding direction, 256-bit intermediates |
//! | [`error`]  | [`MarketError`](error::MarketError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod gate;
pub mod market;
pub mod math;
pub mod memory;
pub mod pool;
pub mod prelude;
pub mod traits;
