//! Market scanner
//!
//! Sweeps the odds book, aggregates each market's quotes, and evaluates
//! every complete line for arbitrage.

use chrono::Utc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use oddsarb_core::{ArbitrageOpportunity, EngineConfig, MarketKind, OpportunityFilter};
use oddsarb_odds_feed::{aggregate_best_odds, OddsBook};

use crate::evaluator::evaluate_arbitrage;

/// Scanner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub scan_interval: Duration,
    /// Quotes older than this are excluded from snapshots
    pub max_quote_age: Duration,
    pub engine: EngineConfig,
    pub parallel_markets: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scan_interval: Duration::from_secs(1),
            max_quote_age: Duration::from_secs(30),
            engine: EngineConfig::default(),
            parallel_markets: true,
        }
    }
}

/// Main arbitrage scanner
pub struct ArbitrageScanner {
    config: ScannerConfig,
    book: Arc<OddsBook>,
    filter: OpportunityFilter,
}

impl ArbitrageScanner {
    pub fn new(config: ScannerConfig, book: Arc<OddsBook>) -> Self {
        Self {
            config,
            book,
            filter: OpportunityFilter::default(),
        }
    }

    /// Update filter
    pub fn set_filter(&mut self, filter: OpportunityFilter) {
        self.filter = filter;
    }

    /// Run continuous scanning until shutdown is signalled
    pub async fn run(&self, mut shutdown: tokio::sync::oneshot::Receiver<()>) {
        info!("starting arbitrage scanner");

        let mut interval = tokio::time::interval(self.config.scan_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let start = Instant::now();
                    let opportunities = self.scan_once();
                    let duration = start.elapsed();

                    if !opportunities.is_empty() {
                        info!("found {} opportunities in {:?}", opportunities.len(), duration);
                        for opp in &opportunities {
                            info!(
                                "opportunity: {} {} margin={:.2}% profit={:.2} via {:?}",
                                opp.event_id,
                                opp.market,
                                opp.margin_pct,
                                opp.allocation.guaranteed_profit,
                                opp.bookmakers(),
                            );
                        }
                    } else {
                        debug!("scan completed in {:?}, no opportunities", duration);
                    }
                }
                _ = &mut shutdown => {
                    info!("scanner shutdown requested");
                    break;
                }
            }
        }
    }

    /// Single sweep over every (event, market) pair in the book
    pub fn scan_once(&self) -> Vec<ArbitrageOpportunity> {
        let start = Instant::now();
        let targets = self.book.markets();

        let opportunities: Vec<ArbitrageOpportunity> = if self.config.parallel_markets {
            targets
                .par_iter()
                .flat_map(|(event_id, market)| self.scan_market(event_id, *market))
                .collect()
        } else {
            targets
                .iter()
                .flat_map(|(event_id, market)| self.scan_market(event_id, *market))
                .collect()
        };

        debug!(
            "scanned {} markets, found {} opportunities in {:?}",
            targets.len(),
            opportunities.len(),
            start.elapsed()
        );

        opportunities
    }

    fn scan_market(&self, event_id: &str, market: MarketKind) -> Vec<ArbitrageOpportunity> {
        let quotes = self
            .book
            .snapshot(event_id, market, self.config.max_quote_age);
        if quotes.is_empty() {
            return vec![];
        }

        let best = aggregate_best_odds(market, &quotes);
        let mut found = Vec::new();

        for (line_idx, line) in best.split_lines().into_iter().enumerate() {
            if !line.is_complete() {
                debug!(
                    %event_id, %market,
                    entries = line.len(),
                    "skipping incomplete outcome set"
                );
                continue;
            }

            match evaluate_arbitrage(&line, self.config.engine.reference_stake) {
                Ok(allocation) => {
                    if !allocation.is_balanced(self.config.engine.payout_tolerance) {
                        warn!(
                            %event_id, %market,
                            payout_spread = allocation.payout_spread(),
                            "allocation payouts outside tolerance, dropping"
                        );
                        continue;
                    }
                    let opp = ArbitrageOpportunity {
                        id: format!("{event_id}:{market}:{line_idx}"),
                        event_id: event_id.to_string(),
                        market,
                        total_implied: allocation.total_implied,
                        margin_pct: allocation.margin_pct,
                        best: line,
                        allocation,
                        detected_at: Utc::now(),
                    };
                    if self.filter.matches(&opp) {
                        found.push(opp);
                    } else {
                        debug!(id = %opp.id, margin_pct = opp.margin_pct, "opportunity filtered");
                    }
                }
                Err(err) if err.is_input_error() => {
                    warn!(%event_id, %market, error = %err, "market rejected");
                }
                Err(err) => {
                    debug!(%event_id, %market, %err);
                }
            }
        }

        found
    }

    /// Get current stats
    pub fn stats(&self) -> ScannerStats {
        let book_stats = self.book.stats();
        ScannerStats {
            tracked_markets: self.book.markets().len(),
            quote_count: book_stats.quote_count,
        }
    }
}

/// Scanner statistics
#[derive(Debug, Clone, Serialize)]
pub struct ScannerStats {
    pub tracked_markets: usize,
    pub quote_count: usize,
}
