//! Batch scan over the odds sheet.
//!
//! Two passes, second one conditional:
//! - collect every fixture whose probability sum is strictly below 1.0,
//!   annotated with the equal-payout stake split;
//! - only when that confirmed list is empty, collect "promising" fixtures
//!   sitting below the near-miss threshold (default 1.05).
//!
//! Both lists keep the sheet's row order. No ranking by profitability.

use console::style;
use tracing::{debug, warn};

use super::allocator::{allocate, StakeAllocation};
use super::evaluator::evaluate;
use crate::sheet::OddsRow;

/// A fixture whose prices sum to a genuine two-way arbitrage.
#[derive(Debug, Clone)]
pub struct ConfirmedOpportunity {
    pub row: OddsRow,
    pub total_probability: f64,
    pub allocation: StakeAllocation,
}

/// A fixture close to - but not at - arbitrage.
#[derive(Debug, Clone)]
pub struct PromisingOpportunity {
    pub row: OddsRow,
    pub total_probability: f64,
    pub allocation: StakeAllocation,
}

impl PromisingOpportunity {
    /// How far the probability sum sits above the break-even line, in
    /// percent. 1.008 → 0.8%.
    pub fn percent_above_breakeven(&self) -> f64 {
        (self.total_probability - 1.0) * 100.0
    }
}

/// Outcome of one scan over the sheet.
///
/// At most one of the two lists is populated: a non-empty confirmed list
/// suppresses the promising pass entirely.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub confirmed: Vec<ConfirmedOpportunity>,
    pub promising: Vec<PromisingOpportunity>,
    pub fixtures_scanned: usize,
}

/// Scans fixtures for two-way arbitrage at a fixed reference stake.
pub struct OpportunityScanner {
    /// Reference stake every allocation is computed at.
    total_stake: f64,

    /// Probability-sum ceiling for the promising pass.
    near_threshold: f64,
}

impl OpportunityScanner {
    pub fn new(total_stake: f64, near_threshold: f64) -> Self {
        Self {
            total_stake,
            near_threshold,
        }
    }

    /// Run the batch scan. Fixtures with odds the evaluator rejects are
    /// skipped with a warning; they never abort the scan.
    pub fn scan(&self, rows: &[OddsRow]) -> ScanReport {
        let mut report = ScanReport {
            fixtures_scanned: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let check = match evaluate(row.home_odds, row.away_odds) {
                Ok(check) => check,
                Err(e) => {
                    warn!("Skipping fixture `{}`: {}", row.teams, e);
                    continue;
                }
            };

            debug!(
                "{}: home {:.2} / away {:.2}, probability sum {:.4}",
                row.teams, row.home_odds, row.away_odds, check.total_probability
            );

            if !check.is_arbitrage {
                continue;
            }

            match allocate(self.total_stake, row.home_odds, row.away_odds) {
                Ok(allocation) => report.confirmed.push(ConfirmedOpportunity {
                    row: row.clone(),
                    total_probability: check.total_probability,
                    allocation,
                }),
                Err(e) => warn!("Skipping fixture `{}`: {}", row.teams, e),
            }
        }

        // A non-empty confirmed list is the sole output of the scan; the
        // near-miss pass runs only on an empty board.
        if !report.confirmed.is_empty() {
            return report;
        }

        for row in rows {
            let Ok(check) = evaluate(row.home_odds, row.away_odds) else {
                continue; // already warned in the first pass
            };

            if check.total_probability >= self.near_threshold {
                continue;
            }

            match allocate(self.total_stake, row.home_odds, row.away_odds) {
                Ok(allocation) => report.promising.push(PromisingOpportunity {
                    row: row.clone(),
                    total_probability: check.total_probability,
                    allocation,
                }),
                Err(e) => warn!("Skipping fixture `{}`: {}", row.teams, e),
            }
        }

        report
    }

    /// Print the per-fixture analysis trace.
    ///
    /// Display only; the scan itself re-evaluates the rows. Not part of any
    /// durable contract.
    pub fn print_summary(&self, rows: &[OddsRow]) {
        if rows.is_empty() {
            warn!("No fixtures to analyze");
            return;
        }

        println!();
        println!("{}", style("═══ FIXTURE ANALYSIS ═══").yellow().bold());
        println!();
        println!(
            "Analysis parameters: Stake=${:.0}, Near-miss threshold={:.2}",
            self.total_stake, self.near_threshold
        );
        println!();

        for (i, row) in rows.iter().enumerate() {
            let check = match evaluate(row.home_odds, row.away_odds) {
                Ok(check) => check,
                Err(_) => continue,
            };

            let status = if check.is_arbitrage {
                style("✓ ARBITRAGE").green()
            } else if check.total_probability < self.near_threshold {
                style("○ promising").yellow()
            } else {
                style("✗ no edge").red()
            };

            println!(
                "  {}. {} | probability sum {:.4}",
                i + 1,
                status,
                check.total_probability
            );
            println!(
                "     {} | Home {:.2} / Away {:.2} | {} | {}",
                style(&row.teams).cyan(),
                row.home_odds,
                row.away_odds,
                row.sport,
                row.date
            );
        }
    }
}

impl Default for OpportunityScanner {
    fn default() -> Self {
        Self::new(100.0, 1.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(teams: &str, home: f64, away: f64) -> OddsRow {
        OddsRow {
            date: "12 Apr".to_string(),
            teams: teams.to_string(),
            sport: "Football".to_string(),
            home_odds: home,
            away_odds: away,
        }
    }

    #[test]
    fn test_confirmed_hit_suppresses_promising_pass() {
        // 2.10/2.05 is a confirmed arbitrage; 1.95/2.02 would be promising
        let rows = vec![
            fixture("Sure - Thing", 2.10, 2.05),
            fixture("Almost - There", 1.95, 2.02),
        ];

        let report = OpportunityScanner::default().scan(&rows);
        assert_eq!(report.confirmed.len(), 1);
        assert!(report.promising.is_empty());
        assert_eq!(report.confirmed[0].row.teams, "Sure - Thing");
        assert_eq!(report.fixtures_scanned, 2);
    }

    #[test]
    fn test_promising_pass_runs_on_empty_board() {
        let rows = vec![
            fixture("Heavy - Margin", 1.80, 1.80), // 1.111, outside threshold
            fixture("Almost - There", 1.95, 2.02), // 1.008, promising
        ];

        let report = OpportunityScanner::default().scan(&rows);
        assert!(report.confirmed.is_empty());
        assert_eq!(report.promising.len(), 1);
        assert_eq!(report.promising[0].row.teams, "Almost - There");

        let above = report.promising[0].percent_above_breakeven();
        assert!((above - 0.787).abs() < 1e-2);
    }

    #[test]
    fn test_overround_fixture_lands_in_neither_list() {
        let report = OpportunityScanner::default().scan(&[fixture("Heavy - Margin", 1.80, 1.80)]);
        assert!(report.confirmed.is_empty());
        assert!(report.promising.is_empty());
    }

    #[test]
    fn test_break_even_is_not_confirmed() {
        // Probability sum exactly 1.0: promising, never confirmed
        let report = OpportunityScanner::default().scan(&[fixture("Even - Money", 2.0, 2.0)]);
        assert!(report.confirmed.is_empty());
        assert_eq!(report.promising.len(), 1);
        assert_eq!(report.promising[0].total_probability, 1.0);
    }

    #[test]
    fn test_sheet_order_preserved() {
        // Second fixture is the more profitable one; order must not change
        let rows = vec![
            fixture("First - Edge", 2.05, 2.02),
            fixture("Bigger - Edge", 2.30, 2.30),
            fixture("Third - Edge", 2.06, 2.01),
        ];

        let report = OpportunityScanner::default().scan(&rows);
        let teams: Vec<&str> = report
            .confirmed
            .iter()
            .map(|c| c.row.teams.as_str())
            .collect();
        assert_eq!(teams, vec!["First - Edge", "Bigger - Edge", "Third - Edge"]);
    }

    #[test]
    fn test_allocations_use_configured_stake() {
        let scanner = OpportunityScanner::new(500.0, 1.05);
        let report = scanner.scan(&[fixture("Sure - Thing", 2.10, 2.05)]);

        let alloc = &report.confirmed[0].allocation;
        assert!((alloc.home_stake + alloc.away_stake - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let rows = vec![
            fixture("Sure - Thing", 2.10, 2.05),
            fixture("Heavy - Margin", 1.80, 1.80),
        ];
        let scanner = OpportunityScanner::default();

        let first = scanner.scan(&rows);
        let second = scanner.scan(&rows);
        assert_eq!(first.confirmed.len(), second.confirmed.len());
        assert_eq!(
            first.confirmed[0].allocation.guaranteed_return,
            second.confirmed[0].allocation.guaranteed_return
        );
    }
}
