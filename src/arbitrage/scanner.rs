//! BoxSpreadScanner - sweeps a chain for box spread arbitrage
//!
//! For each expiry, strikes are walked ascending with calls and puts in
//! lockstep. Every strike S plays two roles:
//! - upper leg B: sell the call, buy the put, realizing `closing_value(S)`
//! - lower leg A: buy the call, sell the put, costing `opening_cost(S)`
//!
//! A box (A, B) is profitable iff `opening_cost(A) < closing_value(B)`, so
//! each strike first queries the index of lower legs seen so far, then adds
//! itself to it.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use ordered_float::OrderedFloat;

use super::cost_index::{OpeningCostIndex, OpeningLeg};
use super::{ArbitrageRecord, ExpirySummary, MismatchPolicy, ScanConfig, ScanReport, SkippedExpiry};
use crate::core::{BoxSpreadError, BoxSpreadResult, ChainIndex, ContractQuote, OptionType};

/// Value realized at strike S by selling the call and buying the put:
/// `S − (put.ask − call.bid)`
pub fn closing_value(strike: f64, call: &ContractQuote, put: &ContractQuote) -> f64 {
    strike - (put.ask - call.bid)
}

/// Cost at strike S of buying the call and selling the put:
/// `S + (call.ask − put.bid)`
pub fn opening_cost(strike: f64, call: &ContractQuote, put: &ContractQuote) -> f64 {
    strike + (call.ask - put.bid)
}

/// Records and strike count for one fully swept expiry
struct ExpirySweep {
    records: Vec<ArbitrageRecord>,
    strikes: usize,
}

/// Finds every box spread arbitrage in a chain.
///
/// Holds the chain by shared reference, so it cannot change while a scan runs.
pub struct BoxSpreadScanner<'a> {
    chain: &'a ChainIndex,
    config: ScanConfig,
}

impl<'a> BoxSpreadScanner<'a> {
    /// Create a scanner with default configuration
    pub fn new(chain: &'a ChainIndex) -> Self {
        Self {
            chain,
            config: ScanConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(chain: &'a ChainIndex, config: ScanConfig) -> Self {
        Self { chain, config }
    }

    /// Get current configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Every box spread arbitrage in the chain, in sweep order.
    ///
    /// An empty chain yields an empty result. Structural mismatches follow
    /// the configured [`MismatchPolicy`].
    pub fn find_all_box_spread_arbitrage(&self) -> BoxSpreadResult<Vec<ArbitrageRecord>> {
        self.scan().map(|report| report.records)
    }

    /// Full scan with per-expiry summaries and skipped expiries
    pub fn scan(&self) -> BoxSpreadResult<ScanReport> {
        self.run(None)
    }

    /// Full scan that stops with [`BoxSpreadError::Cancelled`] once `cancel`
    /// is set. The flag is checked before each expiry.
    pub fn scan_with_cancel(&self, cancel: &AtomicBool) -> BoxSpreadResult<ScanReport> {
        self.run(Some(cancel))
    }

    /// Sweep a single expiry. Mismatches are always returned as errors here.
    pub fn scan_expiry(&self, expiry: NaiveDate) -> BoxSpreadResult<Vec<ArbitrageRecord>> {
        self.config.validate()?;
        self.sweep_expiry(expiry).map(|sweep| sweep.records)
    }

    fn run(&self, cancel: Option<&AtomicBool>) -> BoxSpreadResult<ScanReport> {
        self.config.validate()?;

        let mut report = ScanReport::default();

        for expiry in self.chain.expiries() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                tracing::info!("Scan cancelled before {}", expiry);
                return Err(BoxSpreadError::Cancelled);
            }

            match self.sweep_expiry(expiry) {
                Ok(sweep) => {
                    report.expiries.push(ExpirySummary {
                        expiry,
                        strikes: sweep.strikes,
                        records: sweep.records.len(),
                    });
                    report.records.extend(sweep.records);
                }
                Err(err)
                    if err.is_structural()
                        && self.config.mismatch_policy == MismatchPolicy::SkipExpiry =>
                {
                    tracing::warn!("Skipping expiry {}: {}", expiry, err);
                    report.skipped.push(SkippedExpiry {
                        expiry,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(
            "Box spread scan: {} expiries swept, {} skipped, {} arbitrage records",
            report.expiries.len(),
            report.skipped.len(),
            report.records.len()
        );

        Ok(report)
    }

    fn sweep_expiry(&self, expiry: NaiveDate) -> BoxSpreadResult<ExpirySweep> {
        for side in [OptionType::Call, OptionType::Put] {
            if !self.chain.has_expiry(expiry, side) {
                return Err(BoxSpreadError::ExpiryMismatch {
                    expiry,
                    missing: side,
                });
            }
        }

        let mut calls = self.chain.strikes_ascending(expiry, OptionType::Call);
        let mut puts = self.chain.strikes_ascending(expiry, OptionType::Put);

        // Scoped to this expiry; dropped before the next one starts
        let mut index = OpeningCostIndex::new();
        let mut records = Vec::new();
        let mut strikes = 0;

        loop {
            let (strike, call, put) = match (calls.next(), puts.next()) {
                (None, None) => break,
                (Some((call_strike, call)), Some((put_strike, put)))
                    if OrderedFloat(call_strike) == OrderedFloat(put_strike) =>
                {
                    (call_strike, call, put)
                }
                (call, put) => {
                    return Err(BoxSpreadError::StrikeMismatch {
                        expiry,
                        call_strike: call.map(|(k, _)| k),
                        put_strike: put.map(|(k, _)| k),
                    });
                }
            };
            strikes += 1;

            let closing = closing_value(strike, call, put);
            for (cost, lower) in index.below(closing - self.config.min_profit) {
                records.push(box_record(expiry, strike, call, put, lower, cost, closing));
            }

            index.insert(
                opening_cost(strike, call, put),
                OpeningLeg {
                    call_id: call.id,
                    put_id: put.id,
                    strike,
                },
            );
        }

        tracing::debug!(
            "Expiry {}: {} strikes, {} lower legs indexed, {} records",
            expiry,
            strikes,
            index.len(),
            records.len()
        );

        Ok(ExpirySweep { records, strikes })
    }
}

fn box_record(
    expiry: NaiveDate,
    upper_strike: f64,
    call: &ContractQuote,
    put: &ContractQuote,
    lower: &OpeningLeg,
    opening: f64,
    closing: f64,
) -> ArbitrageRecord {
    let payoff = upper_strike - lower.strike;
    let profit = closing - opening;

    ArbitrageRecord {
        sell_call: call.id,
        buy_call: lower.call_id,
        buy_put: put.id,
        sell_put: lower.put_id,
        expiry,
        lower_strike: lower.strike,
        upper_strike,
        net_cost: payoff - profit,
        payoff,
        profit,
    }
}

/// Convenience function to scan a chain with default configuration
pub fn find_box_spreads(chain: &ChainIndex) -> BoxSpreadResult<Vec<ArbitrageRecord>> {
    BoxSpreadScanner::new(chain).find_all_box_spread_arbitrage()
}
