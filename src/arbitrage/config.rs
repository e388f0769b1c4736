//! Configuration for the box spread scanner

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{BoxSpreadError, BoxSpreadResult};

/// What to do when calls and puts disagree on expiries or strikes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Fail the whole scan with the mismatch error
    #[default]
    Abort,
    /// Drop every record of the offending expiry and keep scanning
    SkipExpiry,
}

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Handling of call/put structural mismatches
    /// Default: Abort
    #[serde(default)]
    pub mismatch_policy: MismatchPolicy,

    /// Minimum profit per box (payoff - net cost) to report.
    /// A box qualifies when profit is strictly greater than this.
    /// Default: 0.0 (any strictly positive profit)
    #[serde(default)]
    pub min_profit: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mismatch_policy: MismatchPolicy::Abort,
            min_profit: 0.0,
        }
    }
}

impl ScanConfig {
    /// Any mismatch fails the scan
    pub fn strict() -> Self {
        Self::default()
    }

    /// Mismatched expiries are skipped and reported
    pub fn lenient() -> Self {
        Self {
            mismatch_policy: MismatchPolicy::SkipExpiry,
            ..Default::default()
        }
    }

    pub fn with_min_profit(mut self, min_profit: f64) -> Self {
        self.min_profit = min_profit;
        self
    }

    pub fn validate(&self) -> BoxSpreadResult<()> {
        if !self.min_profit.is_finite() || self.min_profit < 0.0 {
            return Err(BoxSpreadError::config(format!(
                "min_profit must be a finite non-negative number, got {}",
                self.min_profit
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> BoxSpreadResult<Self> {
        let config: ScanConfig = toml::from_str(contents)
            .map_err(|e| BoxSpreadError::config(format!("Failed to parse scan config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> BoxSpreadResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BoxSpreadError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.mismatch_policy, MismatchPolicy::Abort);
        assert_eq!(config.min_profit, 0.0);
        assert_eq!(ScanConfig::strict(), config);
        assert_eq!(ScanConfig::lenient().mismatch_policy, MismatchPolicy::SkipExpiry);
    }

    #[test]
    fn test_from_toml() {
        let config = ScanConfig::from_toml_str(
            r#"
            mismatch_policy = "skip_expiry"
            min_profit = 0.05
            "#,
        )
        .unwrap();
        assert_eq!(config.mismatch_policy, MismatchPolicy::SkipExpiry);
        assert!((config.min_profit - 0.05).abs() < 1e-12);

        let empty = ScanConfig::from_toml_str("").unwrap();
        assert_eq!(empty, ScanConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ScanConfig::from_toml_str("min_profit = -1.0").is_err());
        assert!(ScanConfig::from_toml_str(r#"mismatch_policy = "ignore""#).is_err());
        assert!(ScanConfig::default().with_min_profit(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.toml");
        std::fs::write(&path, "min_profit = 0.25\n").unwrap();

        let config = ScanConfig::from_toml_file(&path).unwrap();
        assert!((config.min_profit - 0.25).abs() < 1e-12);

        let missing = ScanConfig::from_toml_file(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(BoxSpreadError::Config(_))));
    }
}
