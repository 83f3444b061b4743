//! Arbitrage evaluation and market scanning
//!
//! Features:
//! - Pure stake-allocation evaluation with typed validation errors
//! - Equal-payout split across 2- and 3-way markets
//! - Parallel sweep over the odds book with rayon

pub mod evaluator;
pub mod scanner;

pub use evaluator::evaluate_arbitrage;
pub use scanner::{ArbitrageScanner, ScannerConfig};
