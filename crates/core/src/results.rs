//! Stake allocation results

use serde::{Deserialize, Serialize};

use crate::OutcomeKey;

/// One leg of an arbitrage allocation: the bet to place on one outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeLeg {
    pub outcome: OutcomeKey,
    pub bookmaker: String,
    pub odds: f64,
    pub stake: f64,
    /// stake * odds; identical across legs by construction
    pub payout: f64,
}

/// Output of one arbitrage evaluation
///
/// Immutable value produced by a pure computation; no identity or lifecycle
/// beyond the call that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageResult {
    pub legs: Vec<StakeLeg>,
    pub total_stake: f64,
    /// Realized payout regardless of which outcome wins (S / P)
    pub guaranteed_return: f64,
    pub guaranteed_profit: f64,
    /// Profit relative to the chosen stake, in percent
    pub roi_pct: f64,
    /// Intrinsic margin of the opportunity, (1/P - 1) * 100; stake-independent
    pub margin_pct: f64,
    /// Sum of implied probabilities the allocation was computed from
    pub total_implied: f64,
}

impl ArbitrageResult {
    pub fn stake_for(&self, key: &OutcomeKey) -> Option<f64> {
        self.legs.iter().find(|l| &l.outcome == key).map(|l| l.stake)
    }

    /// Largest payout difference between any two legs; ~0 for a valid split
    pub fn payout_spread(&self) -> f64 {
        let max = self.legs.iter().map(|l| l.payout).fold(f64::MIN, f64::max);
        let min = self.legs.iter().map(|l| l.payout).fold(f64::MAX, f64::min);
        max - min
    }

    /// Whether every leg pays out within the relative tolerance of the
    /// guaranteed return
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.payout_spread() <= tolerance * self.guaranteed_return
    }

    pub fn staked_total(&self) -> f64 {
        self.legs.iter().map(|l| l.stake).sum()
    }
}
