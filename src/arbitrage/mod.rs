//! Box Spread Arbitrage
//!
//! A box spread pairs two strikes A < B of one expiry:
//! - buy the call and sell the put at A
//! - sell the call and buy the put at B
//!
//! At expiry the position is worth exactly B − A whatever the underlying does,
//! so assembling it for less than B − A at the quoted bid/ask locks in a
//! riskless profit.
//!
//! The scanner sweeps each expiry's strikes ascending and keeps an ordered
//! index of opening costs, so every qualifying lower strike is found with one
//! ordered range query instead of comparing all strike pairs.

mod config;
mod cost_index;
mod scanner;

pub use config::*;
pub use scanner::*;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::ContractId;

/// One box spread arbitrage: four legs plus the numbers that qualified it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageRecord {
    /// Call sold at the upper strike
    pub sell_call: ContractId,
    /// Call bought at the lower strike
    pub buy_call: ContractId,
    /// Put bought at the upper strike
    pub buy_put: ContractId,
    /// Put sold at the lower strike
    pub sell_put: ContractId,
    pub expiry: NaiveDate,
    pub lower_strike: f64,
    pub upper_strike: f64,
    /// Premium paid to open all four legs at bid/ask
    pub net_cost: f64,
    /// Guaranteed value at expiry (upper − lower)
    pub payoff: f64,
    /// payoff − net_cost
    pub profit: f64,
}

impl ArbitrageRecord {
    /// Contract ids in (sell call, buy call, buy put, sell put) order
    pub fn ids(&self) -> [ContractId; 4] {
        [self.sell_call, self.buy_call, self.buy_put, self.sell_put]
    }

    /// Profit relative to the capital committed
    pub fn return_on_cost(&self) -> Option<f64> {
        if self.net_cost > 0.0 {
            Some(self.profit / self.net_cost)
        } else {
            None
        }
    }
}

impl fmt::Display for ArbitrageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} box {:.2}/{:.2}: profit {:.4} (cost {:.4}, payoff {:.2})",
            self.expiry, self.lower_strike, self.upper_strike, self.profit, self.net_cost, self.payoff
        )?;
        writeln!(f, "  call_spread_sell_id: {}", self.sell_call)?;
        writeln!(f, "  call_spread_buy_id:  {}", self.buy_call)?;
        writeln!(f, "  put_spread_buy_id:   {}", self.buy_put)?;
        write!(f, "  put_spread_sell_id:  {}", self.sell_put)
    }
}

/// Per-expiry sweep statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirySummary {
    pub expiry: NaiveDate,
    /// Aligned strikes swept
    pub strikes: usize,
    /// Records emitted for this expiry
    pub records: usize,
}

/// An expiry dropped under [`MismatchPolicy::SkipExpiry`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedExpiry {
    pub expiry: NaiveDate,
    pub reason: String,
}

/// Result of a full scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Records in sweep order (expiry ascending, upper strike ascending)
    pub records: Vec<ArbitrageRecord>,
    /// One entry per expiry that was swept to completion
    pub expiries: Vec<ExpirySummary>,
    /// Expiries dropped because of call/put mismatches
    pub skipped: Vec<SkippedExpiry>,
}

impl ScanReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for one expiry
    pub fn records_for(&self, expiry: NaiveDate) -> Vec<&ArbitrageRecord> {
        self.records.iter().filter(|r| r.expiry == expiry).collect()
    }

    /// Most profitable record
    pub fn best(&self) -> Option<&ArbitrageRecord> {
        self.records
            .iter()
            .max_by(|a, b| a.profit.total_cmp(&b.profit))
    }

    /// Sum of profit over all records (each box counted once)
    pub fn total_profit(&self) -> f64 {
        self.records.iter().map(|r| r.profit).sum()
    }
}
