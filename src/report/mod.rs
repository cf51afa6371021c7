//! Phase 3: The Slip (Report Writing)
//!
//! Renders the scan outcome to CSV. The whole report is built in memory and
//! written with a single `fs::write`; running the scan twice on the same
//! sheet produces byte-identical files.
//!
//! Column contracts are fixed: probabilities carry 4 decimal places,
//! monetary figures 2. The promising report's `Profit_Percentage` is
//! `(1 - probability_sum) * 100` - negative for a near miss, since forcing
//! the bet would lock in that loss.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::brain::{ConfirmedOpportunity, PromisingOpportunity};
use crate::error::ScanError;

pub const CONFIRMED_HEADER: &str = "Date,Teams,Sport,Home_Odds,Away_Odds,\
Two_Way_Implied_Probability,Home_Stake,Away_Stake,Guaranteed_Return,Profit,Profit_Percentage";

pub const PROMISING_HEADER: &str =
    "Teams,Home_Odds,Away_Odds,Two_Way_Implied_Probability,Home_Stake,Away_Stake,Profit_Percentage";

/// Display rounding for monetary figures. Everything upstream of the
/// report layer stays unrounded.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render the confirmed-arbitrage report.
pub fn render_confirmed(opportunities: &[ConfirmedOpportunity]) -> String {
    let mut csv = String::from(CONFIRMED_HEADER);
    csv.push('\n');

    for opp in opportunities {
        let alloc = &opp.allocation;
        csv.push_str(&format!(
            "{},{},{},{},{},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2}\n",
            opp.row.date,
            opp.row.teams,
            opp.row.sport,
            opp.row.home_odds,
            opp.row.away_odds,
            opp.total_probability,
            alloc.home_stake,
            alloc.away_stake,
            alloc.guaranteed_return,
            alloc.profit,
            alloc.profit_percentage,
        ));
    }

    csv
}

/// Render the near-miss report.
pub fn render_promising(opportunities: &[PromisingOpportunity]) -> String {
    let mut csv = String::from(PROMISING_HEADER);
    csv.push('\n');

    for opp in opportunities {
        let alloc = &opp.allocation;
        csv.push_str(&format!(
            "{},{},{},{:.4},{:.2},{:.2},{:.2}\n",
            opp.row.teams,
            opp.row.home_odds,
            opp.row.away_odds,
            opp.total_probability,
            alloc.home_stake,
            alloc.away_stake,
            (1.0 - opp.total_probability) * 100.0,
        ));
    }

    csv
}

pub fn write_confirmed_report<P: AsRef<Path>>(
    path: P,
    opportunities: &[ConfirmedOpportunity],
) -> Result<(), ScanError> {
    write_report(path.as_ref(), &render_confirmed(opportunities))
}

pub fn write_promising_report<P: AsRef<Path>>(
    path: P,
    opportunities: &[PromisingOpportunity],
) -> Result<(), ScanError> {
    write_report(path.as_ref(), &render_promising(opportunities))
}

fn write_report(path: &Path, contents: &str) -> Result<(), ScanError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, contents)?;
    info!("Report written to {}", path.display());
    Ok(())
}
