//! Capability traits at the boundary of the market core.
//!
//! The market owns its gate and pool state but nothing else.  Balances,
//! the administrator predicate and event publishing are injected through
//! [`BalanceLedger`], [`AccessControl`] and [`EventSink`], so the core
//! runs unchanged against the in-memory implementations in
//! [`memory`](crate::memory) or any other backend.

mod access_control;
mod balance_ledger;
mod event_sink;
mod from_config;

pub use access_control::AccessControl;
pub use balance_ledger::{BalanceLedger, Transfer};
pub use event_sink::EventSink;
pub use from_config::FromConfig;
