//! Option contract quotes
//!
//! The smallest unit the scanner works with: one leg's identifier and its
//! bid/ask. Everything else about the contract (strike, expiry, side) is
//! carried by where the quote sits in the [`ChainIndex`](super::ChainIndex).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

/// Caller-assigned contract identifier, opaque to the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(pub u64);

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tradable option leg.
///
/// `ask >= bid >= 0` is expected but not checked; degenerate quotes just
/// produce extreme costs downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractQuote {
    /// Contract identifier
    pub id: ContractId,
    /// Price the market pays to buy the contract from us
    pub bid: f64,
    /// Price the market charges to sell the contract to us
    pub ask: f64,
}

impl ContractQuote {
    pub fn new(id: u64, bid: f64, ask: f64) -> Self {
        Self {
            id: ContractId(id),
            bid,
            ask,
        }
    }
}
