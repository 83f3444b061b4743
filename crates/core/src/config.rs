//! Configuration types

use serde::{Deserialize, Serialize};

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Relative tolerance the scanner accepts between leg payouts and the
    /// guaranteed return before dropping an allocation
    pub payout_tolerance: f64,
    /// Stake the scanner evaluates opportunities at; the margin itself is
    /// stake-independent
    pub reference_stake: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            payout_tolerance: 1e-9,
            reference_stake: 100.0,
        }
    }
}
