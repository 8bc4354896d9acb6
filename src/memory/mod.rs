//! In-memory collaborators for the market core.
//!
//! These back the capability traits in [`traits`](crate::traits) with
//! plain maps and vectors.  They are what [`TermMarket::from_config`]
//! wires up and what the tests and demos run against.
//!
//! [`TermMarket::from_config`]: crate::traits::FromConfig::from_config

mod access;
mod ledger;
mod sink;

pub use access::{AdministratorSet, SingleAdministrator};
pub use ledger::InMemoryLedger;
pub use sink::{RecordingSink, TracingSink};
