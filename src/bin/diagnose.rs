//! Diagnostic tool - Check scanner setup
//!
//! Run with: cargo run --bin diagnose

use std::env;
use std::fs;

fn main() {
    println!("🔍 SUREBET DIAGNOSTIC CHECK\n");

    // Load .env
    dotenvy::dotenv().ok();

    println!("═══════════════════════════════════════════════════");
    println!("                  CONFIGURATION                     ");
    println!("═══════════════════════════════════════════════════\n");

    // Key settings
    let checks = [
        ("ODDS_SHEET_PATH", "betpawa_odds.csv", "Where the collector writes odds"),
        ("ARBITRAGE_REPORT_PATH", "betting_arbitrage.csv", "Confirmed-arbitrage report"),
        ("PROMISING_REPORT_PATH", "promising_arbitrage.csv", "Near-miss report"),
        ("TOTAL_STAKE", "100.0", "Reference stake for allocations"),
        ("NEAR_MISS_THRESHOLD", "1.05", "Probability-sum ceiling for near misses"),
        ("OPPORTUNITY_LOG", "true", "Log confirmed opportunities?"),
        ("SCAN_INTERVAL_SECS", "7200", "Seconds between scans in watch mode"),
    ];

    for (key, default, desc) in checks {
        let value = env::var(key).unwrap_or_else(|_| default.to_string());
        let is_default = env::var(key).is_err();
        let marker = if is_default { "(default)" } else { "(from .env)" };
        println!("  {}: {} {}", key, value, marker);
        println!("    └─ {}\n", desc);
    }

    println!("═══════════════════════════════════════════════════");
    println!("                   ODDS SHEET                       ");
    println!("═══════════════════════════════════════════════════\n");

    let sheet_path =
        env::var("ODDS_SHEET_PATH").unwrap_or_else(|_| "betpawa_odds.csv".to_string());

    match fs::read_to_string(&sheet_path) {
        Ok(contents) => {
            let data_rows = contents.lines().skip(1).filter(|l| !l.trim().is_empty()).count();
            println!("  {}: ✅ Found", sheet_path);
            println!("     → {} data rows", data_rows);
            if data_rows == 0 {
                println!("     ⚠️  Sheet is empty - did the collector finish?");
            }
        }
        Err(_) => {
            println!("  {}: ❌ Not found", sheet_path);
            println!("     → The scanner will exit with an error until the");
            println!("       collector produces this file.");
        }
    }

    println!("\n═══════════════════════════════════════════════════");
    println!("                  WHAT TO EXPECT                    ");
    println!("═══════════════════════════════════════════════════\n");

    let stake: f64 = env::var("TOTAL_STAKE")
        .unwrap_or_else(|_| "100.0".to_string())
        .parse()
        .unwrap_or(100.0);

    println!("  With TOTAL_STAKE = ${:.2}:", stake);
    println!("  • True two-way arbitrage is rare on a single book");
    println!("  • Most scans end with near-misses only");
    println!("  • A probability sum of 0.98 pays ~{:.2} guaranteed", stake / 0.98);

    if stake <= 0.0 {
        println!("\n  ⚠️  Non-positive stake! The scanner will refuse to start");
        println!("     until TOTAL_STAKE is fixed.");
    }

    println!("\n✅ Diagnostic complete!\n");
}
