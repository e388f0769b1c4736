//! # Box Spread - Options Box Spread Arbitrage Finder
//!
//! Scans an option chain for riskless box spreads: buy call + sell put at a
//! lower strike A, sell call + buy put at a higher strike B of the same
//! expiry, assembled at the quoted bid/ask for less than the guaranteed
//! payoff B − A.
//!
//! ## Key Components
//!
//! - **ChainIndex**: calls and puts by expiry, then strike ascending
//! - **BoxSpreadScanner**: per-expiry sweep with an ordered opening-cost index
//! - **Snapshots**: JSON chain files loaded into a `ChainIndex`
//!
//! ## Usage
//!
//! ```rust
//! use box_spread::prelude::*;
//! use chrono::NaiveDate;
//!
//! let expiry = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
//! let mut chain = ChainIndex::new();
//! chain.insert_call(expiry, 100.0, ContractQuote::new(1, 9.0, 10.0));
//! chain.insert_put(expiry, 100.0, ContractQuote::new(2, 0.0, 0.5));
//! chain.insert_call(expiry, 110.0, ContractQuote::new(3, 2.0, 2.5));
//! chain.insert_put(expiry, 110.0, ContractQuote::new(4, 0.5, 1.0));
//!
//! let records = BoxSpreadScanner::new(&chain)
//!     .find_all_box_spread_arbitrage()
//!     .unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].sell_call, ContractId(3));
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Boxes spanning two expiries
//! - Fees, margin or any cost beyond bid/ask
//! - Incremental rescans of a chain that is being updated
//! - Persist results

pub mod arbitrage;
pub mod core;
pub mod data;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::core::{
        BoxSpreadError, BoxSpreadResult, ChainIndex, ContractId, ContractQuote, OptionType,
    };

    pub use crate::arbitrage::{
        closing_value, find_box_spreads, opening_cost, ArbitrageRecord, BoxSpreadScanner,
        ExpirySummary, MismatchPolicy, ScanConfig, ScanReport, SkippedExpiry,
    };

    pub use crate::data::{load_snapshot, parse_expiry, ChainSnapshot};
}

// Re-export main types at crate root
pub use crate::arbitrage::{ArbitrageRecord, BoxSpreadScanner, ScanConfig};
pub use crate::core::{BoxSpreadError, BoxSpreadResult, ChainIndex};
