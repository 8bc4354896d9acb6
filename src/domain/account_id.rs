//! Address-like account identifier.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MarketError;

/// A 32-byte account key.
///
/// Every byte sequence is a valid identifier.  The all-zero id plays the
/// role of an unset address: disbursements and purchases refuse it with
/// [`MarketError::ZeroAddress`].
///
/// Displays and parses as `0x`-prefixed lowercase hex, which is also its
/// serde representation.
///
/// # Examples
///
/// ```
/// use term_market::domain::AccountId;
///
/// let id = AccountId::from_bytes([0xab; 32]);
/// let parsed: AccountId = id.to_string().parse().expect("round trip");
/// assert_eq!(parsed, id);
/// assert!(AccountId::zero().is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the unset (all-zero) account.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the unset account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Fails with [`MarketError::ZeroAddress`] for the unset account.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::ZeroAddress`] if `self` is all zeros.
    pub fn ensure_set(&self) -> Result<(), MarketError> {
        if self.is_zero() {
            return Err(MarketError::ZeroAddress);
        }
        Ok(())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| MarketError::InvalidConfiguration("account id must be 32 hex bytes"))?;
        Ok(Self(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
