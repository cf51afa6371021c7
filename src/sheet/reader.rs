//! Odds sheet loading.
//!
//! The sheet is a plain CSV handed over by the collector; it is read in one
//! pass with per-line validation. Rows that fail validation are skipped with
//! a warning - the data is scraped, so partial garbage is expected - but a
//! missing file is terminal: it means the collector never ran.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use super::row::OddsRow;
use crate::error::ScanError;

/// Header line the collector writes. Parsing is positional, so a different
/// header only triggers a warning.
pub const SHEET_HEADER: &str = "Date,Teams,Sport,Home Odds,Draw Odds,Away Odds";

/// A loaded odds sheet: the fixtures that survived validation plus a tally
/// of the rows that did not.
#[derive(Debug, Clone, Default)]
pub struct OddsSheet {
    pub rows: Vec<OddsRow>,
    pub skipped_rows: usize,
}

impl OddsSheet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load and validate the collector's CSV.
///
/// Returns `ScanError::InputNotFound` when the file does not exist, before
/// any read is attempted.
pub fn load_odds_sheet<P: AsRef<Path>>(path: P) -> Result<OddsSheet, ScanError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ScanError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut sheet = OddsSheet::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;

        if i == 0 {
            if line.trim() != SHEET_HEADER {
                warn!(
                    "Unexpected sheet header `{}` - parsing columns by position",
                    line.trim()
                );
            }
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        match OddsRow::parse_line(&line) {
            Ok(row) => sheet.rows.push(row),
            Err(e) => {
                sheet.skipped_rows += 1;
                warn!("Skipping line {} ({}): {}", i + 1, teams_hint(&line), e);
            }
        }
    }

    info!(
        "Loaded {} fixtures from {} ({} rows skipped)",
        sheet.rows.len(),
        path.display(),
        sheet.skipped_rows
    );

    Ok(sheet)
}

/// Best-effort fixture name for warnings about rejected lines.
fn teams_hint(line: &str) -> &str {
    line.split(',').nth(1).map(str::trim).unwrap_or("?")
}
