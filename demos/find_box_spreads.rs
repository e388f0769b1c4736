//! Example: scanning a small chain for box spreads
//!
//! Run with: cargo run --example find_box_spreads

use box_spread::prelude::*;
use chrono::NaiveDate;

fn main() {
    let expiry = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();

    // strike, (call id, bid, ask), (put id, bid, ask)
    let rows = [
        (150.0, (1, 30.30, 30.50), (2, 0.37, 0.38)),
        (155.0, (3, 25.45, 25.70), (4, 0.50, 0.51)),
        (160.0, (5, 20.75, 21.00), (6, 0.72, 0.73)),
        (165.0, (7, 16.36, 16.45), (8, 1.13, 1.14)),
    ];

    let mut chain = ChainIndex::new();
    for (strike, (cid, cbid, cask), (pid, pbid, pask)) in rows {
        chain.insert_call(expiry, strike, ContractQuote::new(cid, cbid, cask));
        chain.insert_put(expiry, strike, ContractQuote::new(pid, pbid, pask));
    }

    println!("=== Leg Values ({}) ===\n", expiry);
    println!("Strike   Opening   Closing");
    for (strike, call) in chain.strikes_ascending(expiry, OptionType::Call) {
        if let Some(put) = chain.put_at(expiry, strike) {
            println!(
                "{:6.1}  {:8.2}  {:8.2}",
                strike,
                opening_cost(strike, call, put),
                closing_value(strike, call, put)
            );
        }
    }

    println!("\n=== Box Spreads ===\n");
    match BoxSpreadScanner::new(&chain).scan() {
        Ok(report) if report.is_empty() => println!("None found"),
        Ok(report) => {
            for record in &report.records {
                println!("{}\n", record);
            }
            println!("Total profit: {:.4}", report.total_profit());
        }
        Err(e) => println!("Scan failed: {}", e),
    }
}
