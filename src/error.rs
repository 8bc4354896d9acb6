//! Unified error types for the term market.
//!
//! Every fallible operation in the crate returns [`MarketError`], so a
//! caller can always tell "try again once the market opens" apart from
//! "fix the amount" and "not permitted".  Errors abort the whole
//! operation: nothing observable changes when one is returned.

use thiserror::Error;

/// Errors raised by the market core and its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MarketError {
    /// A restricted operation was called by a non-administrator.
    #[error("caller is not the market administrator")]
    Unauthorized,

    /// `open` was called while the market is already open.
    #[error("market is already open")]
    AlreadyOpen,

    /// `close` was called while the market is closed.
    #[error("market is not open")]
    NotOpen,

    /// A liquidity or swap operation was attempted while the gate is closed.
    #[error("secondary market is closed for this term")]
    MarketClosed,

    /// A zero amount was supplied where a positive one is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The caller lacks the funds or shares required for a debit.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(&'static str),

    /// A deposit is too small relative to the reserves to mint any share.
    #[error("deposit too small to mint liquidity shares")]
    ZeroLiquidityMinted,

    /// A withdrawal is too small to pay out both assets.
    #[error("withdrawal too small to return both assets")]
    ZeroLiquidityBurned,

    /// A swap output rounds down to zero.
    #[error("swap output rounds to zero")]
    InsufficientOutput,

    /// A swap was attempted against an unseeded pool.
    #[error("pool has no reserves")]
    EmptyPool,

    /// A disbursement or purchase target is the unset account.
    #[error("target account is unset")]
    ZeroAddress,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Market configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

impl MarketError {
    /// Returns `true` for errors that only depend on the gate state and
    /// may succeed once the administrator opens the market.
    #[must_use]
    pub const fn is_gate_error(&self) -> bool {
        matches!(self, Self::MarketClosed | Self::AlreadyOpen | Self::NotOpen)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, MarketError>;
