//! Open/closed switch for the secondary market.
//!
//! The administrator opens the market at the start of a term and closes
//! it at the end.  While closed, liquidity and swap operations fail with
//! [`MarketError::MarketClosed`]; fixed-rate meal purchases are never
//! gated.

use core::fmt;

use crate::error::{MarketError, Result};

/// Whether the secondary market currently accepts trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GateState {
    /// Between terms. The initial state.
    #[default]
    Closed,
    /// A term is in progress.
    Open,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
        }
    }
}

/// Gate state plus the number of terms opened so far.
///
/// # Example
///
/// ```rust
/// use term_market::gate::MarketGate;
///
/// let mut gate = MarketGate::new();
/// assert!(!gate.is_open());
/// assert_eq!(gate.open(), Ok(1));
/// assert!(gate.ensure_open().is_ok());
/// assert_eq!(gate.close(), Ok(1));
/// assert_eq!(gate.open(), Ok(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketGate {
    state: GateState,
    term: u32,
}

impl MarketGate {
    /// Creates a closed gate with no term started.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GateState::Closed,
            term: 0,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// Returns `true` while a term is in progress.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, GateState::Open)
    }

    /// Current (or most recent) term number; `0` before the first opening.
    #[must_use]
    pub const fn term(&self) -> u32 {
        self.term
    }

    /// Opens the market and starts the next term.
    ///
    /// # Errors
    ///
    /// - [`MarketError::AlreadyOpen`] if the gate is open.
    /// - [`MarketError::Overflow`] if the term counter is exhausted.
    pub fn open(&mut self) -> Result<u32> {
        if self.is_open() {
            return Err(MarketError::AlreadyOpen);
        }
        let term = self
            .term
            .checked_add(1)
            .ok_or(MarketError::Overflow("term counter overflow"))?;
        self.term = term;
        self.state = GateState::Open;
        Ok(term)
    }

    /// Closes the market, ending the current term.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::NotOpen`] if the gate is closed.
    pub fn close(&mut self) -> Result<u32> {
        if !self.is_open() {
            return Err(MarketError::NotOpen);
        }
        self.state = GateState::Closed;
        Ok(self.term)
    }

    /// Fails unless the market is open.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::MarketClosed`] if the gate is closed.
    pub const fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(MarketError::MarketClosed)
        }
    }
}
