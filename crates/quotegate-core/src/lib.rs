//! Core contracts for quotegate.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The bar resampling and window trimming pipeline
//! - Adjusted-series fetching with unadjusted fallback
//! - Period dispatch for stock and index history
//! - Multi-exchange search and market statistics
//! - The market feed trait and the deterministic simulator adapter

pub mod adapters;
pub mod domain;
pub mod error;
pub mod feed;
pub mod history;
pub mod markets;
pub mod resample;
pub mod window;

pub use adapters::SimFeed;
pub use domain::{
    Bar, BarSeries, Exchange, InstrumentKind, InstrumentListing, IntradayCurve, MinutePoint,
    Period, PriceLevel, QuoteSnapshot, SecurityClass, TickTrade, TradeLog, TradeSide,
    UtcTimestamp,
};
pub use error::ValidationError;
pub use feed::{AdjustedDay, BarScale, FeedError, MarketFeed};
pub use history::{
    adjusted_daily_series, index_history, stock_chart, stock_history, FetchPlan, FALLBACK_DEPTH,
};
pub use markets::{
    code_directory, market_stats, search, select_exchanges, CodeDirectory, CodeEntry,
    ExchangeTally, MarketStats, SearchHit, SEARCH_CAP,
};
pub use resample::{resample, SamplePeriod};
pub use window::{parse_limit, trim, TrimPolicy, DEFAULT_LIMIT, MAX_LIMIT};
