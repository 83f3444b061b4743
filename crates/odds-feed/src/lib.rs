//! Odds aggregation and snapshot storage
//!
//! Features:
//! - Best-price reduction across bookmaker quotes
//! - Lock-free concurrent quote book
//! - Quote staleness detection

pub mod aggregator;
pub mod book;

pub use aggregator::aggregate_best_odds;
pub use book::OddsBook;
