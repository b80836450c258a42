//! Scripted market feed double for pipeline behavior tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use quotegate_core::{
    AdjustedDay, Bar, BarScale, BarSeries, Exchange, FeedError, InstrumentListing, IntradayCurve,
    MarketFeed, QuoteSnapshot, SamplePeriod, TradeLog, UtcTimestamp,
};

/// Feed whose responses are scripted per endpoint; `None` means failure.
/// Records listing and fallback calls so tests can assert scan behavior.
#[derive(Default)]
pub struct ScriptedFeed {
    pub adjusted: Option<Vec<AdjustedDay>>,
    pub fallback_daily: Option<BarSeries>,
    pub index_daily: Option<BarSeries>,
    pub index_period: Option<BarSeries>,
    pub listings: HashMap<Exchange, Option<Vec<InstrumentListing>>>,
    pub listing_calls: Mutex<Vec<Exchange>>,
    pub fallback_requests: Mutex<Vec<u16>>,
}

fn unavailable() -> FeedError {
    FeedError::Unavailable(String::from("scripted failure"))
}

impl MarketFeed for ScriptedFeed {
    fn quotes(&self, codes: &[String]) -> Result<Vec<QuoteSnapshot>, FeedError> {
        let _ = codes;
        Err(unavailable())
    }

    fn bars(
        &self,
        scale: BarScale,
        _code: &str,
        _start: u16,
        count: u16,
    ) -> Result<BarSeries, FeedError> {
        if scale == BarScale::Day {
            self.fallback_requests
                .lock()
                .expect("lock poisoned")
                .push(count);
            return self.fallback_daily.clone().ok_or_else(unavailable);
        }
        Err(unavailable())
    }

    fn adjusted_daily(&self, _code: &str) -> Result<Vec<AdjustedDay>, FeedError> {
        self.adjusted.clone().ok_or_else(unavailable)
    }

    fn intraday(&self, _date: &str, _code: &str) -> Result<IntradayCurve, FeedError> {
        Err(unavailable())
    }

    fn recent_trades(&self, _code: &str, _start: u16, _count: u16) -> Result<TradeLog, FeedError> {
        Err(unavailable())
    }

    fn trades_on(&self, _date: &str, _code: &str) -> Result<TradeLog, FeedError> {
        Err(unavailable())
    }

    fn listings(&self, exchange: Exchange) -> Result<Vec<InstrumentListing>, FeedError> {
        self.listing_calls
            .lock()
            .expect("lock poisoned")
            .push(exchange);
        match self.listings.get(&exchange) {
            Some(Some(listings)) => Ok(listings.clone()),
            _ => Err(unavailable()),
        }
    }

    fn index_bars(
        &self,
        _scale: BarScale,
        _code: &str,
        _start: u16,
        _count: u16,
    ) -> Result<BarSeries, FeedError> {
        Err(unavailable())
    }

    fn index_daily(&self, _code: &str, _start: u16, count: u16) -> Result<BarSeries, FeedError> {
        let series = self.index_daily.clone().ok_or_else(unavailable)?;
        let mut bars = series.bars;
        bars.truncate(count as usize);
        Ok(BarSeries::from_bars(bars))
    }

    fn index_period_all(
        &self,
        _period: SamplePeriod,
        _code: &str,
    ) -> Result<BarSeries, FeedError> {
        self.index_period.clone().ok_or_else(unavailable)
    }
}

pub fn day_bar(date: &str, close: f64) -> Bar {
    Bar {
        time: UtcTimestamp::parse(&format!("{date}T07:00:00Z")).expect("timestamp"),
        prior_close: 0.0,
        open: close - 0.3,
        high: close + 0.5,
        low: close - 0.5,
        close,
        volume: 1_000,
        amount: close * 1_000.0,
    }
}

pub fn adjusted_day(date: &str, close: f64) -> AdjustedDay {
    AdjustedDay {
        date: UtcTimestamp::parse(&format!("{date}T07:00:00Z")).expect("timestamp"),
        open: close - 0.3,
        high: close + 0.5,
        low: close - 0.5,
        close,
        volume: 1_000,
        amount: close * 1_000.0,
    }
}
