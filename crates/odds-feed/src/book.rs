//! Lock-free odds book
//!
//! Holds the latest fetched quote per (event, market, bookmaker, outcome).
//! Uses DashMap for concurrent reads/writes with minimal contention; the
//! network fetchers that fill it live outside this crate.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::Serialize;
use std::time::{Duration, Instant};

use oddsarb_core::{BookQuote, MarketKind, OutcomeKey};

/// Key for quote lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    pub event_id: String,
    pub market: MarketKind,
    pub bookmaker: String,
    pub outcome: OutcomeKey,
}

impl QuoteKey {
    pub fn for_quote(quote: &BookQuote) -> Self {
        Self {
            event_id: quote.event_id.clone(),
            market: quote.market,
            bookmaker: quote.bookmaker.clone(),
            outcome: quote.key(),
        }
    }
}

/// Timestamped quote entry
#[derive(Debug, Clone)]
pub struct QuoteEntry {
    pub quote: BookQuote,
    pub updated_at: Instant,
}

impl QuoteEntry {
    pub fn age(&self) -> Duration {
        self.updated_at.elapsed()
    }

    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}

/// Concurrent snapshot store for bookmaker quotes
#[derive(Debug)]
pub struct OddsBook {
    quotes: DashMap<QuoteKey, QuoteEntry>,
    update_count: std::sync::atomic::AtomicU64,
    last_update: RwLock<Instant>,
}

impl OddsBook {
    pub fn new() -> Self {
        Self {
            quotes: DashMap::new(),
            update_count: std::sync::atomic::AtomicU64::new(0),
            last_update: RwLock::new(Instant::now()),
        }
    }

    /// Insert or replace the latest quote for its (event, market, book, outcome) slot
    pub fn insert_quote(&self, quote: BookQuote) {
        let key = QuoteKey::for_quote(&quote);
        let entry = QuoteEntry {
            quote,
            updated_at: Instant::now(),
        };

        self.quotes.insert(key, entry);
        self.update_count
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        *self.last_update.write() = Instant::now();
    }

    /// All fresh quotes for one event/market, in deterministic order
    ///
    /// Sorted by (bookmaker, outcome) so downstream tie-breaks are stable
    /// across calls regardless of map iteration order.
    pub fn snapshot(
        &self,
        event_id: &str,
        market: MarketKind,
        max_age: Duration,
    ) -> Vec<BookQuote> {
        let mut quotes: Vec<BookQuote> = self
            .quotes
            .iter()
            .filter(|e| {
                let key = e.key();
                key.event_id == event_id && key.market == market && !e.value().is_stale(max_age)
            })
            .map(|e| e.value().quote.clone())
            .collect();

        quotes.sort_by(|a, b| {
            (a.bookmaker.as_str(), a.key()).cmp(&(b.bookmaker.as_str(), b.key()))
        });
        quotes
    }

    /// When the freshest quote for this event/market was fetched upstream
    pub fn latest_fetch(&self, event_id: &str, market: MarketKind) -> Option<DateTime<Utc>> {
        self.quotes
            .iter()
            .filter(|e| e.key().event_id == event_id && e.key().market == market)
            .map(|e| e.value().quote.fetched_at)
            .max()
    }

    /// Distinct (event, market) pairs currently in the book, sorted
    pub fn markets(&self) -> Vec<(String, MarketKind)> {
        let mut pairs: Vec<(String, MarketKind)> = self
            .quotes
            .iter()
            .map(|e| (e.key().event_id.clone(), e.key().market))
            .collect();
        pairs.sort();
        pairs.dedup();
        pairs
    }

    /// Drop entries older than max_age
    pub fn cleanup(&self, max_age: Duration) {
        self.quotes.retain(|_, v| !v.is_stale(max_age));
    }

    /// Stats
    pub fn stats(&self) -> BookStats {
        BookStats {
            quote_count: self.quotes.len(),
            update_count: self.update_count.load(std::sync::atomic::Ordering::Relaxed),
            last_update_age: self.last_update.read().elapsed(),
        }
    }
}

impl Default for OddsBook {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the odds book
#[derive(Debug, Clone, Serialize)]
pub struct BookStats {
    pub quote_count: usize,
    pub update_count: u64,
    pub last_update_age: Duration,
}
