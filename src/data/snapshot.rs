//! JSON chain snapshots
//!
//! On-disk format for a chain captured by an external fetcher:
//!
//! ```json
//! {
//!   "underlying": "SPY",
//!   "timestamp": "2026-01-30T15:59:00Z",
//!   "chains": [
//!     {
//!       "expiry": "2026-02-02",
//!       "calls": [ { "id": 1, "strike": 150.0, "bid": 30.30, "ask": 30.50 } ],
//!       "puts":  [ { "id": 2, "strike": 150.0, "bid": 0.37, "ask": 0.38 } ]
//!     }
//!   ]
//! }
//! ```
//!
//! `expiry` may be `YYYY-MM-DD` or `YYYYMMDD`. Later rows for the same
//! expiry/strike replace earlier ones.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{BoxSpreadError, BoxSpreadResult, ChainIndex, ContractId, ContractQuote, OptionType};

const EXPIRY_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub chains: Vec<ExpirySnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpirySnapshot {
    pub expiry: String,
    #[serde(default)]
    pub calls: Vec<QuoteRow>,
    #[serde(default)]
    pub puts: Vec<QuoteRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRow {
    pub id: u64,
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
}

/// Parse an expiry in either supported format
pub fn parse_expiry(raw: &str) -> BoxSpreadResult<NaiveDate> {
    let raw = raw.trim();
    EXPIRY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| BoxSpreadError::data(format!("Unrecognized expiry date '{}'", raw)))
}

impl ChainSnapshot {
    pub fn from_json_str(json: &str) -> BoxSpreadResult<Self> {
        serde_json::from_str(json).map_err(|e| BoxSpreadError::Serialization(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> BoxSpreadResult<Self> {
        let file = File::open(path.as_ref())?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| BoxSpreadError::Serialization(e.to_string()))
    }

    /// Build the chain index. Fails on unparseable expiries or non-finite strikes.
    pub fn into_chain_index(self) -> BoxSpreadResult<ChainIndex> {
        let mut chain = ChainIndex::new();
        let mut replaced = 0usize;

        for expiry_snapshot in self.chains {
            let expiry = parse_expiry(&expiry_snapshot.expiry)?;

            for (side, rows) in [
                (OptionType::Call, expiry_snapshot.calls),
                (OptionType::Put, expiry_snapshot.puts),
            ] {
                for row in rows {
                    if !row.strike.is_finite() {
                        return Err(BoxSpreadError::data(format!(
                            "Non-finite strike for contract {} on {}",
                            row.id, expiry
                        )));
                    }
                    let quote = ContractQuote {
                        id: ContractId(row.id),
                        bid: row.bid,
                        ask: row.ask,
                    };
                    if chain.insert(side, expiry, row.strike, quote).is_some() {
                        replaced += 1;
                    }
                }
            }
        }

        if replaced > 0 {
            tracing::debug!("{} duplicate quotes replaced while loading snapshot", replaced);
        }

        Ok(chain)
    }
}

/// Load a snapshot file straight into a chain index
pub fn load_snapshot(path: impl AsRef<Path>) -> BoxSpreadResult<ChainIndex> {
    let path = path.as_ref();
    let snapshot = ChainSnapshot::from_file(path)?;

    tracing::info!(
        "Loaded snapshot for {} from {:?} ({} expiries)",
        snapshot.underlying.as_deref().unwrap_or("unknown underlying"),
        path,
        snapshot.chains.len()
    );

    snapshot.into_chain_index()
}
