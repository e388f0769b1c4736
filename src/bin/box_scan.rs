//! Box spread scanner CLI
//!
//! Loads a JSON chain snapshot and prints every box spread arbitrage in it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use box_spread::prelude::*;

#[derive(Parser)]
#[command(name = "box-scan", about = "Find box spread arbitrage in an option chain snapshot")]
struct Cli {
    /// Chain snapshot (JSON)
    snapshot: PathBuf,

    /// Scanner config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only report boxes with profit strictly above this
    #[arg(long)]
    min_profit: Option<f64>,

    /// Skip expiries whose calls and puts don't line up instead of failing
    #[arg(long)]
    skip_mismatched: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn build_config(cli: &Cli) -> BoxSpreadResult<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::from_toml_file(path)?,
        None => ScanConfig::default(),
    };
    if let Some(min_profit) = cli.min_profit {
        config.min_profit = min_profit;
    }
    if cli.skip_mismatched {
        config.mismatch_policy = MismatchPolicy::SkipExpiry;
    }
    config.validate()?;
    Ok(config)
}

/// Closing lines: box count, total profit and the single best box
fn summary(report: &ScanReport) -> String {
    let mut text = format!(
        "{} boxes, total profit {:.4}",
        report.len(),
        report.total_profit()
    );
    if let Some(best) = report.best() {
        text.push_str(&format!(
            "\nbest: {} {:.2}/{:.2} profit {:.4}",
            best.expiry, best.lower_strike, best.upper_strike, best.profit
        ));
        if let Some(roc) = best.return_on_cost() {
            text.push_str(&format!(" ({:.4}% on cost)", roc * 100.0));
        }
    }
    text
}

fn run(cli: &Cli) -> BoxSpreadResult<()> {
    let config = build_config(cli)?;
    let chain = load_snapshot(&cli.snapshot)?;
    let report = BoxSpreadScanner::with_config(&chain, config).scan()?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| BoxSpreadError::Serialization(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    for skipped in &report.skipped {
        println!("Skipped {}: {}", skipped.expiry, skipped.reason);
    }

    if report.is_empty() {
        println!("No box spread arbitrage found");
        return Ok(());
    }

    for (i, record) in report.records.iter().enumerate() {
        println!("({}): {}\n", i + 1, record);
    }
    println!("{}", summary(&report));

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "box_scan=info,box_spread=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn write_config(dir: &std::path::Path) -> String {
        let path = dir.join("scan.toml");
        std::fs::write(&path, "min_profit = 0.25\nmismatch_policy = \"abort\"\n").unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path());

        let cli = Cli::parse_from([
            "box-scan",
            "chain.json",
            "--config",
            &path,
            "--min-profit",
            "0.5",
            "--skip-mismatched",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.min_profit, 0.5);
        assert_eq!(config.mismatch_policy, MismatchPolicy::SkipExpiry);
    }

    #[test]
    fn test_config_file_without_flags() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path());

        let cli = Cli::parse_from(["box-scan", "chain.json", "--config", &path]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.min_profit, 0.25);
        assert_eq!(config.mismatch_policy, MismatchPolicy::Abort);

        let cli = Cli::parse_from(["box-scan", "chain.json"]);
        assert_eq!(build_config(&cli).unwrap(), ScanConfig::default());
    }

    #[test]
    fn test_negative_min_profit_flag_rejected() {
        let cli = Cli::parse_from(["box-scan", "chain.json", "--min-profit=-1"]);
        assert!(matches!(build_config(&cli), Err(BoxSpreadError::Config(_))));
    }

    #[test]
    fn test_summary_reports_best_box() {
        let expiry = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let record = |lower: f64, upper: f64, profit: f64| ArbitrageRecord {
            sell_call: ContractId(7),
            buy_call: ContractId(3),
            buy_put: ContractId(8),
            sell_put: ContractId(4),
            expiry,
            lower_strike: lower,
            upper_strike: upper,
            net_cost: upper - lower - profit,
            payoff: upper - lower,
            profit,
        };
        let report = ScanReport {
            records: vec![record(150.0, 160.0, 0.5), record(155.0, 165.0, 2.0)],
            ..Default::default()
        };

        let text = summary(&report);
        assert!(text.starts_with("2 boxes, total profit 2.5000"));
        assert!(text.contains("best: 2026-02-02 155.00/165.00 profit 2.0000"));
        assert!(text.contains("(25.0000% on cost)"));

        assert_eq!(summary(&ScanReport::default()), "0 boxes, total profit 0.0000");
    }
}
