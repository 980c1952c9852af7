//! Currency key identifiers.
//!
//! A currency key names one synth (`sUSD`, `sBTC`, ...). On chain it travels
//! as a `bytes32`: the ASCII bytes right-padded with zeros, which bounds keys
//! to 32 bytes.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a string was rejected as a currency key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCurrencyKey {
    /// Empty string.
    #[error("currency key is empty")]
    Empty,

    /// Contains whitespace, control characters, or non-ASCII bytes.
    #[error("currency key {0:?} contains non-printable or non-ASCII characters")]
    NotAscii(String),

    /// Longer than the 32 bytes a `bytes32` encoding can carry.
    #[error("currency key {0:?} exceeds 32 bytes")]
    TooLong(String),
}

/// A validated synth identifier.
///
/// Construction enforces the invariants; every `CurrencyKey` in circulation
/// can be encoded as a `bytes32` without loss.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyKey(String);

impl CurrencyKey {
    /// Validates and wraps a key.
    pub fn new(key: impl Into<String>) -> Result<Self, InvalidCurrencyKey> {
        let key = key.into();
        if key.is_empty() {
            return Err(InvalidCurrencyKey::Empty);
        }
        if !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidCurrencyKey::NotAscii(key));
        }
        if key.len() > 32 {
            return Err(InvalidCurrencyKey::TooLong(key));
        }
        Ok(Self(key))
    }

    /// The key as text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The on-chain `bytes32` encoding: ASCII bytes, right-zero-padded.
    #[must_use]
    pub fn to_bytes32(&self) -> B256 {
        let mut word = [0u8; 32];
        word[..self.0.len()].copy_from_slice(self.0.as_bytes());
        B256::from(word)
    }
}

impl fmt::Display for CurrencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyKey {
    type Err = InvalidCurrencyKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyKey {
    type Error = InvalidCurrencyKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyKey> for String {
    fn from(key: CurrencyKey) -> Self {
        key.0
    }
}
