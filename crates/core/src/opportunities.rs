//! Arbitrage opportunity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ArbitrageResult, BestOddsSet, MarketKind};

/// Detected arbitrage opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub id: String,
    pub event_id: String,
    pub market: MarketKind,

    /// The best-odds set the opportunity was evaluated on
    pub best: BestOddsSet,

    // Profit calculation
    pub total_implied: f64,
    pub margin_pct: f64,
    /// Allocation at the scanner's reference stake
    pub allocation: ArbitrageResult,

    pub detected_at: DateTime<Utc>,
}

impl ArbitrageOpportunity {
    /// Distinct bookmakers the split would be placed with, in entry order
    pub fn bookmakers(&self) -> Vec<&str> {
        let mut books: Vec<&str> = Vec::new();
        for entry in self.best.entries() {
            if !books.contains(&entry.bookmaker.as_str()) {
                books.push(&entry.bookmaker);
            }
        }
        books
    }

    /// An opportunity needing only one book is usually a stale-quote artifact
    pub fn is_cross_book(&self) -> bool {
        self.bookmakers().len() > 1
    }
}

/// Opportunity filter criteria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityFilter {
    pub min_margin_pct: f64,
    /// Empty means all markets pass
    pub markets: Vec<MarketKind>,
    pub require_cross_book: bool,
}

impl Default for OpportunityFilter {
    fn default() -> Self {
        Self {
            min_margin_pct: 0.1,
            markets: vec![],
            require_cross_book: false,
        }
    }
}

impl OpportunityFilter {
    pub fn matches(&self, opp: &ArbitrageOpportunity) -> bool {
        opp.margin_pct >= self.min_margin_pct
            && (self.markets.is_empty() || self.markets.contains(&opp.market))
            && (!self.require_cross_book || opp.is_cross_book())
    }
}
