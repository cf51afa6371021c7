//! Surebet - Two-Way Arbitrage Scanner
//!
//! Reads the odds sheet the collector scraped, checks every fixture for a
//! two-way (home/away) arbitrage, and writes the CSV report: confirmed
//! opportunities when any exist, otherwise near-miss "promising" fixtures.
//!
//! Run with: cargo run

use std::collections::HashMap;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::Result;
use console::style;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod brain;
mod config;
mod error;
mod report;
mod sheet;

use brain::{OpportunityScanner, ScanReport};
use config::{Config, OpportunityLog};
use error::ScanError;
use sheet::{load_odds_sheet, OddsSheet};

/// Two-way arbitrage scanner for scraped bookmaker odds sheets
#[derive(Parser, Debug)]
#[command(name = "surebet", version, about)]
struct Cli {
    /// Odds sheet CSV produced by the collector
    #[arg(short, long)]
    input: Option<String>,

    /// Load configuration from a TOML file instead of the environment
    #[arg(short, long)]
    config: Option<String>,

    /// Reference stake for stake allocations
    #[arg(long)]
    stake: Option<f64>,

    /// Probability-sum ceiling for the promising pass
    #[arg(long)]
    near_threshold: Option<f64>,

    /// Keep rescanning on the configured interval
    #[arg(long)]
    watch: bool,
}

fn print_banner() {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!(
        "{}",
        style(" 🎯 SUREBET - Two-Way Arbitrage Scanner").cyan().bold()
    );
    println!(
        "{}",
        style("    Implied Probability | Equal-Payout Stakes | CSV Reports").cyan()
    );
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("surebet=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    print_banner();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    apply_overrides(&mut config, &cli);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        error!("Please check your .env file or command-line flags");
        return Err(e);
    }

    // Print configuration summary
    config.print_summary();
    println!();

    loop {
        run_scan(&config)?;

        if !config.watch {
            break;
        }
        info!(
            "Watch mode: next scan in {}s",
            config.scan_interval_secs
        );
        thread::sleep(Duration::from_secs(config.scan_interval_secs));
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(input) = &cli.input {
        config.input_path = input.clone();
    }
    if let Some(stake) = cli.stake {
        config.total_stake = stake;
    }
    if let Some(threshold) = cli.near_threshold {
        config.near_threshold = threshold;
    }
    if cli.watch {
        config.watch = true;
    }
}

/// One full pass: load the sheet, scan it, write the report.
fn run_scan(config: &Config) -> Result<()> {
    // =============================================
    // PHASE 1: THE SHEET
    // =============================================
    println!();
    println!("{}", style("═══ PHASE 1: THE SHEET ═══").blue().bold());
    println!();

    println!(
        "{}",
        style(format!(
            "Step 1.1: Loading odds sheet from {}...",
            config.input_path
        ))
        .blue()
    );
    let start = Instant::now();

    let sheet = match load_odds_sheet(&config.input_path) {
        Ok(sheet) => sheet,
        Err(e @ ScanError::InputNotFound { .. }) => {
            error!("{}", e);
            error!("Run the collector first, or point ODDS_SHEET_PATH at its output");
            return Err(e.into());
        }
        Err(e) => {
            error!("Failed to read {}: {}", config.input_path, e);
            return Err(e.into());
        }
    };

    let load_time = start.elapsed();
    println!(
        "{} Loaded {} fixtures in {:?}",
        style("✓").green(),
        sheet.len(),
        load_time
    );
    if sheet.skipped_rows > 0 {
        println!(
            "   {} malformed rows skipped (see warnings above)",
            sheet.skipped_rows
        );
    }
    if sheet.is_empty() {
        warn!("Odds sheet has no usable rows - the reports will stay empty");
    }

    let mut sport_counts: HashMap<&str, usize> = HashMap::new();
    for row in &sheet.rows {
        *sport_counts.entry(row.sport.as_str()).or_insert(0) += 1;
    }
    println!("   Sport breakdown:");
    for (sport, count) in &sport_counts {
        println!("     {}: {} fixtures", sport, count);
    }

    // =============================================
    // PHASE 2: THE EDGE
    // =============================================
    println!();
    println!("{}", style("═══ PHASE 2: THE EDGE ═══").magenta().bold());

    let scanner = OpportunityScanner::new(config.total_stake, config.near_threshold);
    scanner.print_summary(&sheet.rows);

    let start = Instant::now();
    let report = scanner.scan(&sheet.rows);
    let scan_time = start.elapsed();

    println!();
    println!(
        "{} Scanned {} fixtures in {:?}: {} confirmed, {} promising",
        style("✓").green(),
        report.fixtures_scanned,
        scan_time,
        report.confirmed.len(),
        report.promising.len()
    );

    // =============================================
    // PHASE 3: THE SLIP
    // =============================================
    println!();
    println!("{}", style("═══ PHASE 3: THE SLIP ═══").green().bold());
    println!();

    if !report.confirmed.is_empty() {
        print_confirmed(&report);

        if let Err(e) =
            report::write_confirmed_report(&config.confirmed_report_path, &report.confirmed)
        {
            error!("Failed to write {}: {}", config.confirmed_report_path, e);
            return Err(e.into());
        }
        println!(
            "{} {} confirmed opportunities saved to {}",
            style("✓").green(),
            report.confirmed.len(),
            config.confirmed_report_path
        );

        if config.opportunity_log {
            append_opportunity_log(config, &report);
        }
    } else if !report.promising.is_empty() {
        print_promising(&report);

        if let Err(e) =
            report::write_promising_report(&config.promising_report_path, &report.promising)
        {
            error!("Failed to write {}: {}", config.promising_report_path, e);
            return Err(e.into());
        }
        println!(
            "{} {} promising fixtures saved to {}",
            style("✓").green(),
            report.promising.len(),
            config.promising_report_path
        );
    } else {
        println!(
            "{}",
            style("No arbitrage or near-arbitrage found in this sheet.").yellow()
        );
        println!("Bookmaker margins are doing their job. Collect fresh odds and rescan.");
    }

    print_scan_tally(config, &sheet, &report);

    Ok(())
}

fn print_confirmed(report: &ScanReport) {
    println!(
        "{}",
        style(format!(
            "Found {} ARBITRAGE opportunities!",
            report.confirmed.len()
        ))
        .green()
        .bold()
    );

    for (i, opp) in report.confirmed.iter().enumerate() {
        let alloc = &opp.allocation;

        println!();
        println!("{}. 💰 {}", i + 1, style(&opp.row.teams).cyan());
        println!("   {} | {}", opp.row.sport, opp.row.date);
        println!(
            "   Odds: Home {:.2} / Away {:.2} | probability sum {:.4}",
            opp.row.home_odds, opp.row.away_odds, opp.total_probability
        );
        println!(
            "   Stakes: Home ${:.2} / Away ${:.2}",
            alloc.home_stake, alloc.away_stake
        );
        println!(
            "   Guaranteed return: ${:.2} | Profit: ${:.2} ({:.2}%)",
            alloc.guaranteed_return, alloc.profit, alloc.profit_percentage
        );
    }
    println!();
}

fn print_promising(report: &ScanReport) {
    println!(
        "{}",
        style("No confirmed arbitrage - listing promising fixtures instead.").yellow()
    );

    for (i, opp) in report.promising.iter().enumerate() {
        let alloc = &opp.allocation;

        println!();
        println!("{}. ○ {}", i + 1, style(&opp.row.teams).cyan());
        println!(
            "   Odds: Home {:.2} / Away {:.2} | probability sum {:.4}",
            opp.row.home_odds, opp.row.away_odds, opp.total_probability
        );
        println!(
            "   {:.2}% above the break-even line",
            opp.percent_above_breakeven()
        );
        println!(
            "   Stakes if forced: Home ${:.2} / Away ${:.2}",
            alloc.home_stake, alloc.away_stake
        );
    }
    println!();
}

fn append_opportunity_log(config: &Config, report: &ScanReport) {
    for opp in &report.confirmed {
        let alloc = &opp.allocation;
        let entry = OpportunityLog {
            timestamp: Utc::now(),
            date: opp.row.date.clone(),
            teams: opp.row.teams.clone(),
            sport: opp.row.sport.clone(),
            home_odds: opp.row.home_odds,
            away_odds: opp.row.away_odds,
            implied_probability: opp.total_probability,
            home_stake: report::round2(alloc.home_stake),
            away_stake: report::round2(alloc.away_stake),
            guaranteed_return: report::round2(alloc.guaranteed_return),
            profit: report::round2(alloc.profit),
            profit_percentage: report::round2(alloc.profit_percentage),
        };

        if let Err(e) = entry.append_to_file(&config.opportunity_log_path) {
            warn!("Failed to append opportunity log: {}", e);
        }
    }

    println!(
        "{} Opportunities logged to: {}",
        style("📝").cyan(),
        config.opportunity_log_path
    );
}

fn print_scan_tally(config: &Config, sheet: &OddsSheet, report: &ScanReport) {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").green()
    );
    println!("{}", style(" ✅ SCAN COMPLETE").green().bold());
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").green()
    );
    println!();
    println!("Summary:");
    println!(
        "  • Fixtures scanned: {} ({} malformed rows skipped)",
        report.fixtures_scanned, sheet.skipped_rows
    );
    println!("  • Confirmed arbitrage: {}", report.confirmed.len());
    println!("  • Promising near-misses: {}", report.promising.len());
    if !report.confirmed.is_empty() {
        println!("  • Report: {}", config.confirmed_report_path);
    } else if !report.promising.is_empty() {
        println!("  • Report: {}", config.promising_report_path);
    } else {
        println!("  • Report: none written");
    }
    println!();
}
