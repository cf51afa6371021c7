//! Failure taxonomy for the scanner.
//!
//! Three conditions matter:
//! - a missing odds sheet is terminal (the collector never ran),
//! - bad odds in a single row are skippable (the sheet is scraped data),
//! - a non-positive stake is a configuration mistake, fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// The odds sheet the collector was supposed to produce does not exist.
    #[error("odds sheet not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Odds must be positive, finite decimals. Scraped sheets routinely
    /// carry "N/A" or zeroed cells; callers skip the row instead of
    /// aborting the scan.
    #[error("invalid odds: home {home}, away {away} (both must be positive)")]
    InvalidOdds { home: f64, away: f64 },

    /// The configured reference stake makes no sense.
    #[error("invalid total stake {stake}: stake must be positive")]
    InvalidStake { stake: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
