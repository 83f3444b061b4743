//! Bookmaker quotes and aggregated best-odds sets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{MarketKind, OutcomeKey, Point, QuoteError};

/// One bookmaker's price for one outcome of one event/market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookQuote {
    pub bookmaker: String,
    pub event_id: String,
    pub market: MarketKind,
    pub outcome: String,
    /// Decimal odds: stake * odds = total payout if the outcome wins
    pub odds: f64,
    pub point: Option<Point>,
    pub fetched_at: DateTime<Utc>,
}

impl BookQuote {
    pub fn new(
        bookmaker: impl Into<String>,
        event_id: impl Into<String>,
        market: MarketKind,
        outcome: impl Into<String>,
        odds: f64,
    ) -> Self {
        Self {
            bookmaker: bookmaker.into(),
            event_id: event_id.into(),
            market,
            outcome: outcome.into(),
            odds,
            point: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn with_point(mut self, point: f64) -> Self {
        self.point = Point::from_f64(point);
        self
    }

    /// Outcome identity this quote prices
    pub fn key(&self) -> OutcomeKey {
        OutcomeKey {
            label: self.outcome.clone(),
            point: self.point,
        }
    }

    /// Break-even probability this price encodes
    pub fn implied_probability(&self) -> f64 {
        1.0 / self.odds
    }

    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.outcome.trim().is_empty() {
            return Err(QuoteError::MissingOutcome);
        }
        if !self.odds.is_finite() {
            return Err(QuoteError::NonFiniteOdds);
        }
        if self.odds <= 1.0 {
            return Err(QuoteError::OddsOutOfRange(self.odds));
        }
        if self.market.uses_points() && self.point.is_none() {
            return Err(QuoteError::MissingPoint);
        }
        Ok(())
    }
}

/// The winning quote for one outcome after aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPrice {
    pub outcome: OutcomeKey,
    pub bookmaker: String,
    pub odds: f64,
}

impl BestPrice {
    pub fn implied_probability(&self) -> f64 {
        1.0 / self.odds
    }
}

/// Best available price per outcome across all books quoting a market
///
/// Entries are kept sorted by outcome key so repeated evaluations over the
/// same set are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOddsSet {
    pub market: MarketKind,
    entries: Vec<BestPrice>,
}

impl BestOddsSet {
    pub fn empty(market: MarketKind) -> Self {
        Self {
            market,
            entries: vec![],
        }
    }

    /// Build a set from entries, keeping one slot per outcome key
    ///
    /// Duplicate keys keep the first entry pushed; a set can therefore never
    /// report more coverage than it has distinct outcomes, and completeness
    /// checks downstream count real slots.
    pub fn from_entries(market: MarketKind, mut entries: Vec<BestPrice>) -> Self {
        entries.sort_by(|a, b| a.outcome.cmp(&b.outcome));
        entries.dedup_by(|next, prev| next.outcome == prev.outcome);
        Self { market, entries }
    }

    pub fn get(&self, key: &OutcomeKey) -> Option<&BestPrice> {
        self.entries.iter().find(|e| &e.outcome == key)
    }

    pub fn entries(&self) -> &[BestPrice] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the set covers every outcome slot the market requires
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.market.outcome_count()
    }

    /// Sum of per-outcome implied probabilities (the "book total")
    ///
    /// Below 1.0 the combined best lines leave room for a risk-free split.
    pub fn total_implied(&self) -> f64 {
        self.entries.iter().map(|e| e.implied_probability()).sum()
    }

    /// Split a multi-line spread/total set into one set per quoted line
    ///
    /// Books quote several lines for the same market; best prices are only
    /// comparable within one line. Moneyline sets come back unchanged.
    pub fn split_lines(&self) -> Vec<BestOddsSet> {
        if !self.market.uses_points() {
            return vec![self.clone()];
        }

        let mut lines: BTreeMap<Option<i32>, Vec<BestPrice>> = BTreeMap::new();
        for entry in &self.entries {
            lines
                .entry(entry.outcome.line())
                .or_default()
                .push(entry.clone());
        }

        lines
            .into_values()
            .map(|entries| BestOddsSet::from_entries(self.market, entries))
            .collect()
    }
}
