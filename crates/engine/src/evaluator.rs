//! Arbitrage evaluation and stake allocation
//!
//! Pure, stateless computation: given the best decimal odds per outcome and
//! a total stake, decide whether a risk-free split exists and compute it.

use oddsarb_core::{ArbitrageResult, BestOddsSet, EngineError, EngineResult, StakeLeg};

/// Evaluate a complete best-odds set for arbitrage at the given total stake
///
/// With implied probabilities `p_i = 1 / o_i` and `P = sum(p_i)`, an
/// arbitrage exists iff `P < 1`. The allocation `stake_i = S * p_i / P` is
/// the unique split with identical payout `stake_i * o_i = S / P` on every
/// outcome.
///
/// Validation runs before any allocation math, in order: stake, outcome
/// count, odds range. `P >= 1` (including exactly 1) returns
/// [`EngineError::NoArbitrage`] — a losing allocation is never produced.
pub fn evaluate_arbitrage(best: &BestOddsSet, total_stake: f64) -> EngineResult<ArbitrageResult> {
    if !total_stake.is_finite() || total_stake <= 0.0 {
        return Err(EngineError::InvalidStake(total_stake));
    }

    let expected = best.market.outcome_count();
    if best.len() != expected {
        return Err(EngineError::IncompleteOutcomeSet {
            expected,
            found: best.len(),
        });
    }

    for entry in best.entries() {
        if !entry.odds.is_finite() || entry.odds <= 1.0 {
            return Err(EngineError::InvalidOdds {
                outcome: entry.outcome.to_string(),
                odds: entry.odds,
            });
        }
    }

    let total_implied = best.total_implied();
    if total_implied >= 1.0 {
        return Err(EngineError::NoArbitrage { total_implied });
    }

    let guaranteed_return = total_stake / total_implied;
    let legs: Vec<StakeLeg> = best
        .entries()
        .iter()
        .map(|entry| {
            let stake = total_stake * entry.implied_probability() / total_implied;
            StakeLeg {
                outcome: entry.outcome.clone(),
                bookmaker: entry.bookmaker.clone(),
                odds: entry.odds,
                stake,
                payout: stake * entry.odds,
            }
        })
        .collect();

    let guaranteed_profit = guaranteed_return - total_stake;

    Ok(ArbitrageResult {
        legs,
        total_stake,
        guaranteed_return,
        guaranteed_profit,
        roi_pct: guaranteed_profit / total_stake * 100.0,
        margin_pct: (1.0 / total_implied - 1.0) * 100.0,
        total_implied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oddsarb_core::{BestPrice, MarketKind, OutcomeKey};
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn set(market: MarketKind, odds: &[(&str, f64)]) -> BestOddsSet {
        BestOddsSet::from_entries(
            market,
            odds.iter()
                .map(|(label, o)| BestPrice {
                    outcome: OutcomeKey::new(*label),
                    bookmaker: format!("book-{label}"),
                    odds: *o,
                })
                .collect(),
        )
    }

    fn three_way() -> BestOddsSet {
        set(
            MarketKind::H2h3Way,
            &[("home", 2.10), ("draw", 3.60), ("away", 4.20)],
        )
    }

    #[test]
    fn test_three_way_profitable_split() {
        let result = evaluate_arbitrage(&three_way(), 100.0).unwrap();

        assert!((result.total_implied - 125.0 / 126.0).abs() < EPS);
        assert!((result.guaranteed_return - 100.8).abs() < 1e-6);
        assert!((result.guaranteed_profit - 0.8).abs() < 1e-6);
        assert!((result.roi_pct - 0.8).abs() < 1e-6);
        assert!((result.margin_pct - 0.8).abs() < 1e-6);

        assert!((result.stake_for(&OutcomeKey::new("home")).unwrap() - 48.0).abs() < 1e-6);
        assert!((result.stake_for(&OutcomeKey::new("draw")).unwrap() - 28.0).abs() < 1e-6);
        assert!((result.stake_for(&OutcomeKey::new("away")).unwrap() - 24.0).abs() < 1e-6);

        // every leg pays out the same amount
        assert!(result.payout_spread() < EPS * result.guaranteed_return);
        assert!((result.staked_total() - 100.0).abs() < EPS * 100.0);
    }

    #[test]
    fn test_two_way_no_arbitrage() {
        let err = evaluate_arbitrage(&set(MarketKind::H2h, &[("home", 1.85), ("away", 1.95)]), 100.0)
            .unwrap_err();
        assert!(!err.is_input_error());
        match err {
            EngineError::NoArbitrage { total_implied } => assert!(total_implied > 1.0),
            other => panic!("expected NoArbitrage, got {other:?}"),
        }
    }

    #[test]
    fn test_break_even_book_is_not_an_opportunity() {
        // P == 1 exactly: zero profit must not be reported as an arbitrage
        let err =
            evaluate_arbitrage(&set(MarketKind::H2h, &[("home", 2.0), ("away", 2.0)]), 50.0)
                .unwrap_err();
        assert!(matches!(err, EngineError::NoArbitrage { total_implied } if total_implied == 1.0));
    }

    #[test]
    fn test_incomplete_three_way_is_not_a_two_way_fallback() {
        // two of three outcomes quoted; P < 1 on the partial data would look
        // like a (false) opportunity if the count check were skipped
        let partial = set(MarketKind::H2h3Way, &[("home", 2.10), ("away", 4.20)]);
        let err = evaluate_arbitrage(&partial, 100.0).unwrap_err();
        assert_eq!(err, EngineError::IncompleteOutcomeSet { expected: 3, found: 2 });
    }

    #[test]
    fn test_duplicate_outcome_is_not_a_complete_set() {
        // "home" quoted twice never covers "away"; this must surface as an
        // incomplete set, not a guaranteed 25% profit on one outcome
        let dup = BestOddsSet::from_entries(
            MarketKind::H2h,
            vec![
                BestPrice { outcome: OutcomeKey::new("home"), bookmaker: "a".into(), odds: 2.5 },
                BestPrice { outcome: OutcomeKey::new("home"), bookmaker: "b".into(), odds: 2.5 },
            ],
        );

        let err = evaluate_arbitrage(&dup, 100.0).unwrap_err();
        assert_eq!(err, EngineError::IncompleteOutcomeSet { expected: 2, found: 1 });
    }

    #[test]
    fn test_invalid_stake_rejected_before_allocation() {
        for stake in [-50.0, 0.0, f64::NAN, f64::INFINITY] {
            let err = evaluate_arbitrage(&three_way(), stake).unwrap_err();
            assert!(matches!(err, EngineError::InvalidStake(_)), "stake {stake}");
        }
    }

    #[test]
    fn test_invalid_odds_rejected() {
        let bad = set(MarketKind::H2h, &[("home", 0.95), ("away", 2.50)]);
        let err = evaluate_arbitrage(&bad, 100.0).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidOdds { outcome: "home".into(), odds: 0.95 }
        );

        let non_finite = set(MarketKind::H2h, &[("home", f64::INFINITY), ("away", 2.50)]);
        assert!(matches!(
            evaluate_arbitrage(&non_finite, 100.0).unwrap_err(),
            EngineError::InvalidOdds { .. }
        ));
    }

    #[test]
    fn test_extreme_odds_get_near_zero_stake() {
        // a huge outlier price is valid; its leg just shrinks toward zero
        let lopsided = set(MarketKind::H2h, &[("home", 1.20), ("away", 50_000.0)]);
        let result = evaluate_arbitrage(&lopsided, 1_000.0).unwrap();

        let away = result.stake_for(&OutcomeKey::new("away")).unwrap();
        assert!(away < 0.03);
        assert!(result.payout_spread() < EPS * result.guaranteed_return);
    }

    #[test]
    fn test_idempotent_bit_for_bit() {
        let a = evaluate_arbitrage(&three_way(), 250.0).unwrap();
        let b = evaluate_arbitrage(&three_way(), 250.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_payout_equality_and_stake_conservation(
            o1 in 1.01f64..100.0,
            o2 in 1.01f64..100.0,
            o3 in 1.01f64..100.0,
            stake in 0.01f64..1_000_000.0,
        ) {
            let best = set(MarketKind::H2h3Way, &[("home", o1), ("draw", o2), ("away", o3)]);
            prop_assume!(best.total_implied() < 1.0);

            let result = evaluate_arbitrage(&best, stake).unwrap();
            let ret = result.guaranteed_return;

            for leg in &result.legs {
                prop_assert!((leg.stake * leg.odds - ret).abs() < EPS * ret);
            }
            prop_assert!((result.staked_total() - stake).abs() < EPS * stake);
            prop_assert!(result.guaranteed_profit > 0.0);
        }

        #[test]
        fn prop_margin_increases_with_any_single_odds(
            o1 in 1.5f64..50.0,
            o2 in 2.5f64..50.0,
            bump in 0.01f64..10.0,
        ) {
            let base = set(MarketKind::H2h, &[("home", o1), ("away", o2)]);
            prop_assume!(base.total_implied() < 1.0);

            let improved = set(MarketKind::H2h, &[("home", o1 + bump), ("away", o2)]);
            let before = evaluate_arbitrage(&base, 100.0).unwrap();
            let after = evaluate_arbitrage(&improved, 100.0).unwrap();

            prop_assert!(after.total_implied < before.total_implied);
            prop_assert!(after.margin_pct > before.margin_pct);
        }

        #[test]
        fn prop_margin_is_stake_independent(
            stake_a in 1.0f64..10_000.0,
            stake_b in 1.0f64..10_000.0,
        ) {
            let a = evaluate_arbitrage(&three_way(), stake_a).unwrap();
            let b = evaluate_arbitrage(&three_way(), stake_b).unwrap();
            prop_assert!((a.margin_pct - b.margin_pct).abs() < EPS);
        }
    }
}
