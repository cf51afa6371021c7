//! Equal-payout stake split.
//!
//! Staking each outcome in proportion to its implied probability makes the
//! payout identical whichever side wins: with `p = 1/odds`, the home payout
//! is `odds * stake * p / p_total = stake_total / p_total`, and symmetrically
//! for away. When the probability sum is below 1.0 that shared payout
//! exceeds the stake - the arbitrage profit.

use super::evaluator::evaluate;
use crate::error::ScanError;

/// How a reference stake splits across the two outcomes, and what it earns.
///
/// All figures are unrounded; display rounding belongs to the report layer
/// so that downstream arithmetic never compounds rounding error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StakeAllocation {
    pub home_stake: f64,
    pub away_stake: f64,

    /// Payout under either outcome: `total_stake / p_total`.
    pub guaranteed_return: f64,

    /// `guaranteed_return - total_stake`. Negative when the prices carry
    /// an overround (the usual case).
    pub profit: f64,

    /// Profit as a percentage of the total stake.
    pub profit_percentage: f64,
}

/// Split `total_stake` across home and away for an equal payout.
///
/// Fails with `ScanError::InvalidStake` for a non-positive stake and with
/// `ScanError::InvalidOdds` under the same conditions as the evaluator.
pub fn allocate(
    total_stake: f64,
    home_odds: f64,
    away_odds: f64,
) -> Result<StakeAllocation, ScanError> {
    if !(total_stake > 0.0) || !total_stake.is_finite() {
        return Err(ScanError::InvalidStake { stake: total_stake });
    }

    let check = evaluate(home_odds, away_odds)?;

    let p_home = home_odds.recip();
    let p_away = away_odds.recip();
    let p_total = check.total_probability;

    let home_stake = total_stake * p_home / p_total;
    let away_stake = total_stake * p_away / p_total;
    let guaranteed_return = home_odds * home_stake;
    let profit = guaranteed_return - total_stake;

    Ok(StakeAllocation {
        home_stake,
        away_stake,
        guaranteed_return,
        profit,
        profit_percentage: profit / total_stake * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_stakes_sum_to_total() {
        let alloc = allocate(100.0, 2.10, 2.05).unwrap();
        assert!((alloc.home_stake + alloc.away_stake - 100.0).abs() < TOL);

        let alloc = allocate(250.0, 1.95, 2.02).unwrap();
        assert!((alloc.home_stake + alloc.away_stake - 250.0).abs() < TOL);
    }

    #[test]
    fn test_payouts_equal_on_both_sides() {
        for (home, away) in [(2.10, 2.05), (1.80, 1.80), (1.95, 2.02), (3.50, 1.40)] {
            let alloc = allocate(100.0, home, away).unwrap();
            assert!(
                (home * alloc.home_stake - away * alloc.away_stake).abs() < TOL,
                "unequal payouts for odds {home}/{away}"
            );
            assert!((alloc.guaranteed_return - home * alloc.home_stake).abs() < TOL);
        }
    }

    #[test]
    fn test_arbitrage_pair_earns_its_margin() {
        // 2.10/2.05: p_total = 0.963995, so 100 staked returns 100/0.963995
        let alloc = allocate(100.0, 2.10, 2.05).unwrap();
        let p_total = 2.10f64.recip() + 2.05f64.recip();

        assert!((alloc.guaranteed_return - 100.0 / p_total).abs() < TOL);
        assert!((alloc.home_stake - 49.397).abs() < 1e-3);
        assert!((alloc.away_stake - 50.603).abs() < 1e-3);
        assert!((alloc.guaranteed_return - 103.735).abs() < 1e-3);
        assert!(alloc.profit > 0.0);
        assert!((alloc.profit_percentage - 3.735).abs() < 1e-3);
    }

    #[test]
    fn test_overround_pair_loses() {
        let alloc = allocate(100.0, 1.80, 1.80).unwrap();
        assert!((alloc.home_stake - 50.0).abs() < TOL);
        assert!((alloc.away_stake - 50.0).abs() < TOL);
        assert!((alloc.guaranteed_return - 90.0).abs() < TOL);
        assert!(alloc.profit < 0.0);
    }

    #[test]
    fn test_invalid_stake_rejected() {
        assert!(matches!(
            allocate(0.0, 2.10, 2.05),
            Err(ScanError::InvalidStake { .. })
        ));
        assert!(matches!(
            allocate(-50.0, 2.10, 2.05),
            Err(ScanError::InvalidStake { .. })
        ));
        assert!(matches!(
            allocate(f64::NAN, 2.10, 2.05),
            Err(ScanError::InvalidStake { .. })
        ));
    }

    #[test]
    fn test_invalid_odds_rejected() {
        assert!(matches!(
            allocate(100.0, 0.0, 2.05),
            Err(ScanError::InvalidOdds { .. })
        ));
    }
}
