//! Cross-market fan-out: search, code directory and market statistics.
//!
//! Each query scans up to three listing partitions in fixed order. A failed
//! partition fetch is logged and skipped; partial results are acceptable and
//! never surface as an error to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Exchange, UtcTimestamp};
use crate::feed::MarketFeed;

/// Maximum number of search hits accumulated across all partitions.
pub const SEARCH_CAP: usize = 50;

/// One search result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub code: String,
    pub name: String,
}

/// One entry of the full code directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub name: String,
    pub exchange: String,
}

/// Full stock code directory with per-partition counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDirectory {
    pub total: usize,
    pub exchanges: BTreeMap<String, usize>,
    pub codes: Vec<CodeEntry>,
}

/// Directional tallies for one partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTally {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    pub flat: usize,
}

/// Per-partition market breadth statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    pub sh: ExchangeTally,
    pub sz: ExchangeTally,
    pub bj: ExchangeTally,
    pub update_time: String,
}

/// Resolve an optional exchange filter to the partitions to scan.
///
/// A recognized token selects exactly one partition; anything else selects
/// all three in fixed order.
pub fn select_exchanges(filter: Option<&str>) -> Vec<Exchange> {
    match filter.and_then(Exchange::from_token) {
        Some(exchange) => vec![exchange],
        None => Exchange::ALL.to_vec(),
    }
}

/// Search tradable equities by case-sensitive substring on code or name.
///
/// Accumulation stops at [`SEARCH_CAP`] hits; remaining partitions are not
/// scanned once the cap is reached.
pub fn search(feed: &dyn MarketFeed, keyword: &str) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    for exchange in Exchange::ALL {
        let listings = match feed.listings(exchange) {
            Ok(listings) => listings,
            Err(error) => {
                tracing::warn!(%exchange, %error, "listing fetch failed, skipping partition");
                continue;
            }
        };

        for entry in listings {
            if !entry.is_stock() {
                continue;
            }
            if entry.code.contains(keyword) || entry.name.contains(keyword) {
                hits.push(SearchHit {
                    code: entry.code,
                    name: entry.name,
                });
                if hits.len() >= SEARCH_CAP {
                    return hits;
                }
            }
        }
    }

    hits
}

/// Full stock code directory, optionally restricted to one partition.
pub fn code_directory(feed: &dyn MarketFeed, filter: Option<&str>) -> CodeDirectory {
    let mut directory = CodeDirectory {
        total: 0,
        exchanges: BTreeMap::new(),
        codes: Vec::new(),
    };

    for exchange in select_exchanges(filter) {
        let listings = match feed.listings(exchange) {
            Ok(listings) => listings,
            Err(error) => {
                tracing::warn!(%exchange, %error, "listing fetch failed, skipping partition");
                continue;
            }
        };

        let mut count = 0;
        for entry in listings {
            if !entry.is_stock() {
                continue;
            }
            directory.codes.push(CodeEntry {
                code: entry.code,
                name: entry.name,
                exchange: exchange.as_str().to_owned(),
            });
            count += 1;
        }
        directory.exchanges.insert(exchange.as_str().to_owned(), count);
        directory.total += count;
    }

    directory
}

/// Market breadth statistics per partition.
///
/// Each equity counts toward up/down/flat by the sign of its listing's
/// `last_price`. Partitions are independent; a failed fetch leaves that
/// partition's tally at zero.
pub fn market_stats(feed: &dyn MarketFeed) -> MarketStats {
    let mut stats = MarketStats {
        sh: ExchangeTally::default(),
        sz: ExchangeTally::default(),
        bj: ExchangeTally::default(),
        update_time: format_update_time(UtcTimestamp::now()),
    };

    for exchange in Exchange::ALL {
        let listings = match feed.listings(exchange) {
            Ok(listings) => listings,
            Err(error) => {
                tracing::warn!(%exchange, %error, "listing fetch failed, skipping partition");
                continue;
            }
        };

        let mut tally = ExchangeTally::default();
        for entry in listings {
            if !entry.is_stock() {
                continue;
            }
            tally.total += 1;
            if entry.last_price > 0.0 {
                tally.up += 1;
            } else if entry.last_price < 0.0 {
                tally.down += 1;
            } else {
                tally.flat += 1;
            }
        }

        match exchange {
            Exchange::Shanghai => stats.sh = tally,
            Exchange::Shenzhen => stats.sz = tally,
            Exchange::Beijing => stats.bj = tally,
        }
    }

    stats
}

fn format_update_time(ts: UtcTimestamp) -> String {
    let inner = ts.into_inner();
    let date = inner.date();
    let time = inner.time();
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        date.year(),
        date.month() as u8,
        date.day(),
        time.hour(),
        time.minute(),
        time.second()
    )
}
