//! Amount type for expense values
//!
//! An expense amount is a strictly positive, finite decimal. The invariant is
//! enforced at construction, so an `Amount` held anywhere in the ledger is
//! always valid. Totals computed from amounts are plain `f64` because they may
//! legitimately be zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A strictly positive, finite expense amount
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Create an amount, rejecting NaN, infinities, zero and negatives
    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Parse an amount from text (surrounding whitespace ignored)
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let s = s.trim();
        let value: f64 = s
            .parse()
            .map_err(|_| AmountError::InvalidFormat(s.to_string()))?;
        Self::new(value)
    }

    /// Get the numeric value
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    /// Shortest decimal that reads back as the same value (`10`, `10.5`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Reasons a value cannot be an expense amount
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    #[error("amount must be a finite number")]
    NotFinite,
    #[error("amount must be greater than zero, got {0}")]
    NotPositive(f64),
    #[error("invalid amount: '{0}'")]
    InvalidFormat(String),
}
