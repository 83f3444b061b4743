//! Error types

use thiserror::Error;

/// Rejection reasons for a single bookmaker quote
///
/// A bad quote is dropped from aggregation, never fatal to the batch.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuoteError {
    #[error("outcome label is empty")]
    MissingOutcome,

    #[error("odds are not a finite number")]
    NonFiniteOdds,

    #[error("odds {0} out of range: decimal odds must be > 1.0")]
    OddsOutOfRange(f64),

    #[error("point value required for spread/total markets")]
    MissingPoint,
}

/// Evaluation errors
///
/// `NoArbitrage` is an expected, frequent result — most quoted markets are
/// not arbitrageable — and must stay distinguishable from broken input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid stake {0}: stake must be a positive finite number")]
    InvalidStake(f64),

    #[error("incomplete outcome set: market requires {expected} outcomes, got {found}")]
    IncompleteOutcomeSet { expected: usize, found: usize },

    #[error("invalid odds {odds} for outcome '{outcome}'")]
    InvalidOdds { outcome: String, odds: f64 },

    #[error("no arbitrage: total implied probability {total_implied:.6} >= 1")]
    NoArbitrage { total_implied: f64 },
}

impl EngineError {
    /// True for the three input-error kinds, false for `NoArbitrage`
    pub fn is_input_error(&self) -> bool {
        !matches!(self, EngineError::NoArbitrage { .. })
    }
}

/// Result type alias
pub type EngineResult<T> = Result<T, EngineError>;
