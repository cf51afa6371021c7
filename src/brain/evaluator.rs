//! Two-way implied-probability check.
//!
//! Decimal odds imply a probability of `1 / odds`. When the implied
//! probabilities of the two mutually exclusive outcomes (draw excluded)
//! sum below 1.0, the bookmaker is quoting a guaranteed profit.

use crate::error::ScanError;

/// Outcome of the implied-probability check for one fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArbitrageCheck {
    /// True iff the probability sum is strictly below 1.0.
    /// A sum of exactly 1.0 is break-even, not an opportunity.
    pub is_arbitrage: bool,

    /// `1/home_odds + 1/away_odds`
    pub total_probability: f64,
}

/// Check a home/away price pair for a two-way arbitrage.
///
/// Pure and deterministic. Odds must be positive and finite; anything else
/// fails with `ScanError::InvalidOdds` rather than producing an inverted
/// or divide-by-zero result.
pub fn evaluate(home_odds: f64, away_odds: f64) -> Result<ArbitrageCheck, ScanError> {
    if !odds_valid(home_odds) || !odds_valid(away_odds) {
        return Err(ScanError::InvalidOdds {
            home: home_odds,
            away: away_odds,
        });
    }

    let total_probability = home_odds.recip() + away_odds.recip();

    Ok(ArbitrageCheck {
        is_arbitrage: total_probability < 1.0,
        total_probability,
    })
}

fn odds_valid(odds: f64) -> bool {
    odds > 0.0 && odds.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arbitrage_detected() {
        // 1/2.10 + 1/2.05 = 0.9640, a genuine two-way arbitrage
        let check = evaluate(2.10, 2.05).unwrap();
        assert!(check.is_arbitrage);
        assert!((check.total_probability - 0.963995).abs() < 1e-6);
    }

    #[test]
    fn test_overround_is_not_arbitrage() {
        // Typical book: both sides priced short of evens
        let check = evaluate(1.80, 1.80).unwrap();
        assert!(!check.is_arbitrage);
        assert!((check.total_probability - 1.111111).abs() < 1e-6);
    }

    #[test]
    fn test_break_even_boundary_is_not_arbitrage() {
        // 1/2 + 1/2 == 1.0 exactly in binary floating point
        let check = evaluate(2.0, 2.0).unwrap();
        assert_eq!(check.total_probability, 1.0);
        assert!(!check.is_arbitrage);
    }

    #[test]
    fn test_probability_sum_is_exact() {
        let (home, away) = (1.95, 2.02);
        let check = evaluate(home, away).unwrap();
        assert_eq!(check.total_probability, home.recip() + away.recip());
        assert_eq!(check.is_arbitrage, check.total_probability < 1.0);
    }

    #[test]
    fn test_invalid_odds_rejected() {
        assert!(matches!(
            evaluate(0.0, 2.05),
            Err(ScanError::InvalidOdds { .. })
        ));
        assert!(matches!(
            evaluate(2.10, -1.0),
            Err(ScanError::InvalidOdds { .. })
        ));
        assert!(matches!(
            evaluate(f64::NAN, 2.05),
            Err(ScanError::InvalidOdds { .. })
        ));
        assert!(matches!(
            evaluate(2.10, f64::INFINITY),
            Err(ScanError::InvalidOdds { .. })
        ));
    }
}
