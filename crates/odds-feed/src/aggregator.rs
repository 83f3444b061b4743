//! Best-price selection across bookmaker quotes

use std::collections::BTreeMap;
use tracing::debug;

use oddsarb_core::{BestOddsSet, BestPrice, BookQuote, MarketKind, OutcomeKey};

/// Reduce bookmaker quotes for one event/market to the best price per outcome
///
/// Quotes that fail validation (bad odds, missing labels) are dropped from
/// consideration without failing the batch. Outcomes on different point
/// lines are distinct and never compared against each other. On equal odds
/// the first quote in input order wins, so the result is stable for a given
/// input sequence. An empty input (or one where nothing survives filtering)
/// yields an empty set; callers must check completeness before evaluating.
pub fn aggregate_best_odds(market: MarketKind, quotes: &[BookQuote]) -> BestOddsSet {
    let mut best: BTreeMap<OutcomeKey, BestPrice> = BTreeMap::new();

    for quote in quotes {
        if quote.market != market {
            debug!(
                bookmaker = %quote.bookmaker,
                expected = %market,
                got = %quote.market,
                "dropping quote for wrong market"
            );
            continue;
        }
        if let Err(reason) = quote.validate() {
            debug!(
                bookmaker = %quote.bookmaker,
                outcome = %quote.outcome,
                %reason,
                "dropping invalid quote"
            );
            continue;
        }

        let key = quote.key();
        match best.get_mut(&key) {
            Some(current) if quote.odds > current.odds => {
                current.bookmaker = quote.bookmaker.clone();
                current.odds = quote.odds;
            }
            Some(_) => {} // equal or worse price: first seen wins
            None => {
                best.insert(
                    key.clone(),
                    BestPrice {
                        outcome: key,
                        bookmaker: quote.bookmaker.clone(),
                        odds: quote.odds,
                    },
                );
            }
        }
    }

    BestOddsSet::from_entries(market, best.into_values().collect())
}
