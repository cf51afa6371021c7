//! A single fixture row and its validation rules.
//!
//! The collector writes six columns per fixture:
//! `Date, Teams, Sport, Home Odds, Draw Odds, Away Odds`.
//! The draw column is carried by the file format but dropped here -
//! the analysis is strictly two-way (home/away).

use thiserror::Error;

/// Number of columns a well-formed sheet row carries.
pub const COLUMN_COUNT: usize = 6;

/// One fixture from the odds sheet, with both odds already validated.
///
/// Odds are decimal (payout multiplier including stake). The date stays a
/// string: the collector emits whatever the site displayed, and nothing
/// downstream does date arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct OddsRow {
    pub date: String,
    pub teams: String,
    pub sport: String,
    pub home_odds: f64,
    pub away_odds: f64,
}

/// Why a sheet line failed validation.
///
/// Scraped sheets are unreliable by nature; callers log these and move on
/// rather than aborting the scan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowParseError {
    #[error("expected {COLUMN_COUNT} columns, found {found}")]
    ColumnCount { found: usize },

    #[error("{field} odds `{value}` is not a number")]
    UnparsableOdds { field: &'static str, value: String },

    #[error("{field} odds {value} must be a positive number")]
    NonPositiveOdds { field: &'static str, value: f64 },
}

impl OddsRow {
    /// Parse a raw sheet line into a validated row.
    ///
    /// Numeric fields are parsed eagerly so that bad data ("N/A" cells,
    /// zeroed odds) is caught at ingestion, not mid-analysis.
    pub fn parse_line(line: &str) -> Result<Self, RowParseError> {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() != COLUMN_COUNT {
            return Err(RowParseError::ColumnCount { found: parts.len() });
        }

        let home_odds = parse_odds("home", parts[3])?;
        // parts[4] is the draw price; ignored by the two-way analysis
        let away_odds = parse_odds("away", parts[5])?;

        Ok(Self {
            date: parts[0].to_string(),
            teams: parts[1].to_string(),
            sport: parts[2].to_string(),
            home_odds,
            away_odds,
        })
    }
}

fn parse_odds(field: &'static str, raw: &str) -> Result<f64, RowParseError> {
    let value: f64 = raw.parse().map_err(|_| RowParseError::UnparsableOdds {
        field,
        value: raw.to_string(),
    })?;

    // NaN fails the comparison, infinities fail the finiteness check
    if !(value > 0.0) || !value.is_finite() {
        return Err(RowParseError::NonPositiveOdds { field, value });
    }

    Ok(value)
}
