//! Runtime configuration for the scanner.
//!
//! Everything is loadable from environment variables (with a `.env` file),
//! from a TOML file, or overridden on the command line. Validation runs once
//! at startup: a bad stake is a configuration mistake and fatal, unlike the
//! per-row data problems the scan tolerates.

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::ScanError;

// ============================================
// MAIN CONFIGURATION
// ============================================

/// Main configuration for the scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // ========== Input ==========
    /// Odds sheet CSV produced by the collector
    pub input_path: String,

    // ========== Reports ==========
    /// Where the confirmed-arbitrage report is written
    pub confirmed_report_path: String,

    /// Where the near-miss report is written
    pub promising_report_path: String,

    // ========== Analysis Parameters ==========
    /// Reference stake every allocation is computed at
    pub total_stake: f64,

    /// Probability-sum ceiling for the promising pass.
    /// 1.05 = within 5% of break-even.
    pub near_threshold: f64,

    // ========== Opportunity Log ==========
    /// Enable/disable the append-only log of confirmed opportunities
    pub opportunity_log: bool,

    /// Path of the append-only opportunity log
    pub opportunity_log_path: String,

    // ========== Watch Mode ==========
    /// Keep rescanning on an interval instead of exiting after one pass
    pub watch: bool,

    /// Seconds between scans in watch mode. The collector refreshes the
    /// sheet every couple of hours, so the default matches that cadence.
    pub scan_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            input_path: env::var("ODDS_SHEET_PATH")
                .unwrap_or_else(|_| "betpawa_odds.csv".to_string()),
            confirmed_report_path: env::var("ARBITRAGE_REPORT_PATH")
                .unwrap_or_else(|_| "betting_arbitrage.csv".to_string()),
            promising_report_path: env::var("PROMISING_REPORT_PATH")
                .unwrap_or_else(|_| "promising_arbitrage.csv".to_string()),

            total_stake: env::var("TOTAL_STAKE")
                .unwrap_or_else(|_| "100.0".to_string())
                .parse()
                .unwrap_or(100.0),
            near_threshold: env::var("NEAR_MISS_THRESHOLD")
                .unwrap_or_else(|_| "1.05".to_string())
                .parse()
                .unwrap_or(1.05),

            opportunity_log: env::var("OPPORTUNITY_LOG")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            opportunity_log_path: env::var("OPPORTUNITY_LOG_PATH")
                .unwrap_or_else(|_| "./logs/confirmed_opportunities.log".to_string()),

            watch: env::var("WATCH_MODE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            scan_interval_secs: env::var("SCAN_INTERVAL_SECS")
                .unwrap_or_else(|_| "7200".to_string())
                .parse()
                .unwrap_or(7200),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration before the first scan
    pub fn validate(&self) -> Result<()> {
        if self.input_path.is_empty() {
            return Err(eyre::eyre!("ODDS_SHEET_PATH must not be empty"));
        }

        // A non-positive stake is a startup error, not a per-row data error
        if !(self.total_stake > 0.0) || !self.total_stake.is_finite() {
            return Err(ScanError::InvalidStake {
                stake: self.total_stake,
            }
            .into());
        }

        if self.near_threshold < 1.0 {
            return Err(eyre::eyre!(
                "NEAR_MISS_THRESHOLD must be at least 1.0 (currently {:.2}); \
                 values below 1.0 would hide confirmed opportunities",
                self.near_threshold
            ));
        }
        if self.near_threshold > 2.0 {
            return Err(eyre::eyre!(
                "NEAR_MISS_THRESHOLD {:.2} would flag virtually every fixture as promising",
                self.near_threshold
            ));
        }

        if self.watch && self.scan_interval_secs == 0 {
            return Err(eyre::eyre!(
                "SCAN_INTERVAL_SECS must be positive in watch mode"
            ));
        }

        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════╗");
        println!("║               SUREBET - CONFIGURATION                      ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ Odds Sheet:        {:<39} ║", self.input_path);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ ANALYSIS                                                   ║");
        println!("║ • Total Stake:     ${:<38.2} ║", self.total_stake);
        println!("║ • Near Threshold:  {:<39.2} ║", self.near_threshold);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ REPORTS                                                    ║");
        println!("║ • Confirmed:       {:<39} ║", self.confirmed_report_path);
        println!("║ • Promising:       {:<39} ║", self.promising_report_path);
        println!("║ • Opportunity Log: {:<39} ║",
            if self.opportunity_log { "✓ Enabled" } else { "✗ Disabled" }
        );
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ WATCH MODE                                                 ║");
        println!("║ • Enabled:         {:<39} ║",
            if self.watch { "✓ Yes" } else { "✗ No (single scan)" }
        );
        println!("║ • Interval:        {:<34} secs ║", self.scan_interval_secs);
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: "betpawa_odds.csv".to_string(),
            confirmed_report_path: "betting_arbitrage.csv".to_string(),
            promising_report_path: "promising_arbitrage.csv".to_string(),
            total_stake: 100.0,
            near_threshold: 1.05,
            opportunity_log: true,
            opportunity_log_path: "./logs/confirmed_opportunities.log".to_string(),
            watch: false,
            scan_interval_secs: 7200,
        }
    }
}

// ============================================
// OPPORTUNITY LOGGER
// ============================================

use chrono::{DateTime, Utc};
use std::io::Write;

/// One confirmed opportunity, appended as a JSON line every time a scan
/// finds it. Unlike the CSV reports this file is never rewritten, so it
/// keeps a history across watch-mode rescans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityLog {
    pub timestamp: DateTime<Utc>,
    pub date: String,
    pub teams: String,
    pub sport: String,
    pub home_odds: f64,
    pub away_odds: f64,
    pub implied_probability: f64,
    pub home_stake: f64,
    pub away_stake: f64,
    pub guaranteed_return: f64,
    pub profit: f64,
    pub profit_percentage: f64,
}

impl OpportunityLog {
    /// Append this log to a file
    pub fn append_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        let json = serde_json::to_string(self)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.total_stake, 100.0);
        assert_eq!(config.near_threshold, 1.05);
        assert!(!config.watch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_positive_stake_is_fatal() {
        let config = Config {
            total_stake: 0.0,
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::InvalidStake { .. })
        ));
    }

    #[test]
    fn test_threshold_bounds_enforced() {
        let too_low = Config {
            near_threshold: 0.95,
            ..Config::default()
        };
        assert!(too_low.validate().is_err());

        let too_high = Config {
            near_threshold: 2.5,
            ..Config::default()
        };
        assert!(too_high.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected_in_watch_mode() {
        let config = Config {
            watch: true,
            scan_interval_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        // Fine outside watch mode: the interval is never used
        let config = Config {
            watch: false,
            scan_interval_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surebet.toml");

        let mut config = Config::default();
        config.total_stake = 250.0;
        config.watch = true;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.total_stake, 250.0);
        assert!(loaded.watch);
        assert_eq!(loaded.input_path, config.input_path);
    }

    #[test]
    fn test_opportunity_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("opportunities.log");

        let entry = OpportunityLog {
            timestamp: Utc::now(),
            date: "12 Apr".to_string(),
            teams: "Sure - Thing".to_string(),
            sport: "Football".to_string(),
            home_odds: 2.10,
            away_odds: 2.05,
            implied_probability: 0.964,
            home_stake: 49.40,
            away_stake: 50.60,
            guaranteed_return: 103.73,
            profit: 3.73,
            profit_percentage: 3.73,
        };

        entry.append_to_file(&path).unwrap();
        entry.append_to_file(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().all(|l| l.contains("Sure - Thing")));
    }
}
