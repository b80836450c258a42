//! Market feed boundary.
//!
//! The upstream exchange-protocol client is consumed through `MarketFeed`,
//! a typed request/response contract. Everything behind it (wire protocol,
//! sessions, reconnects) is the adapter's concern; everything in front of it
//! treats any adapter failure uniformly as "fetch failed".

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    BarSeries, Exchange, InstrumentListing, IntradayCurve, QuoteSnapshot, TradeLog, UtcTimestamp,
};
use crate::resample::SamplePeriod;

/// Fixed bar granularities the upstream source serves directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarScale {
    Minute1,
    Minute5,
    Minute15,
    Minute30,
    Hour,
    Day,
}

impl BarScale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute1 => "minute1",
            Self::Minute5 => "minute5",
            Self::Minute15 => "minute15",
            Self::Minute30 => "minute30",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

impl Display for BarScale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw front-adjusted daily record, prior to normalization.
///
/// The adjusted source carries no prior-close field; the fetcher synthesizes
/// it from the preceding record's close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedDay {
    pub date: UtcTimestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub amount: f64,
}

/// Upstream fetch errors, uniform across endpoints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("no data for '{code}'")]
    NoData { code: String },
}

/// Long-lived handle to the external market data source.
///
/// One instance is shared by every in-flight request; implementations must
/// be safe for concurrent use.
pub trait MarketFeed: Send + Sync {
    /// Batch quote snapshot fetch, at most 50 codes per call.
    fn quotes(&self, codes: &[String]) -> Result<Vec<QuoteSnapshot>, FeedError>;

    /// Fixed-granularity bar fetch by offset and count.
    fn bars(&self, scale: BarScale, code: &str, start: u16, count: u16)
        -> Result<BarSeries, FeedError>;

    /// Full front-adjusted daily history for one instrument.
    fn adjusted_daily(&self, code: &str) -> Result<Vec<AdjustedDay>, FeedError>;

    /// Intraday per-minute curve for a `YYYYMMDD` date.
    fn intraday(&self, date: &str, code: &str) -> Result<IntradayCurve, FeedError>;

    /// Most recent tick trades by offset and count.
    fn recent_trades(&self, code: &str, start: u16, count: u16) -> Result<TradeLog, FeedError>;

    /// Full tick trade log for a historical `YYYYMMDD` date.
    fn trades_on(&self, date: &str, code: &str) -> Result<TradeLog, FeedError>;

    /// Full instrument listing for one partition.
    fn listings(&self, exchange: Exchange) -> Result<Vec<InstrumentListing>, FeedError>;

    /// Fixed-granularity index bar fetch.
    fn index_bars(
        &self,
        scale: BarScale,
        code: &str,
        start: u16,
        count: u16,
    ) -> Result<BarSeries, FeedError>;

    /// Unadjusted index daily bars; indices carry no adjustment concept.
    fn index_daily(&self, code: &str, start: u16, count: u16) -> Result<BarSeries, FeedError>;

    /// Pre-aggregated weekly/monthly index history, full depth.
    fn index_period_all(&self, period: SamplePeriod, code: &str) -> Result<BarSeries, FeedError>;
}
