//! History pipeline: adjusted-series fetching and period dispatch.
//!
//! Daily stock bars prefer the front-adjusted source and degrade to the
//! unadjusted source on failure. Weekly and monthly stock bars are built by
//! resampling the daily series; index weekly/monthly bars come from the
//! upstream pre-aggregated fetch instead.

use crate::domain::{Bar, BarSeries, Period};
use crate::feed::{BarScale, FeedError, MarketFeed};
use crate::resample::{resample, SamplePeriod};
use crate::window::{trim, TrimPolicy, MAX_LIMIT};

/// Depth of the unadjusted fallback fetch and of full-history chart fetches.
pub const FALLBACK_DEPTH: u16 = 800;

/// Fetch strategy a period token maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPlan {
    /// Served directly by the upstream source at a fixed granularity.
    Fixed(BarScale),
    /// Daily path: adjusted fetch with unadjusted fallback.
    AdjustedDaily,
    /// Daily path followed by calendar-period resampling.
    Resampled(SamplePeriod),
}

impl FetchPlan {
    /// The closed period-token-to-strategy mapping table.
    pub const fn for_period(period: Period) -> Self {
        match period {
            Period::Minute1 => Self::Fixed(BarScale::Minute1),
            Period::Minute5 => Self::Fixed(BarScale::Minute5),
            Period::Minute15 => Self::Fixed(BarScale::Minute15),
            Period::Minute30 => Self::Fixed(BarScale::Minute30),
            Period::Hour => Self::Fixed(BarScale::Hour),
            Period::Day => Self::AdjustedDaily,
            Period::Week => Self::Resampled(SamplePeriod::Week),
            Period::Month => Self::Resampled(SamplePeriod::Month),
        }
    }
}

/// Daily bars preferring the front-adjusted source.
///
/// On any primary failure the unadjusted source serves the most recent
/// [`FALLBACK_DEPTH`] bars instead; the degradation is logged, not surfaced.
/// An error is returned only when both sources fail.
pub fn adjusted_daily_series(feed: &dyn MarketFeed, code: &str) -> Result<BarSeries, FeedError> {
    let days = match feed.adjusted_daily(code) {
        Ok(days) => days,
        Err(error) => {
            tracing::warn!(code, %error, "adjusted daily fetch failed, falling back to unadjusted bars");
            return feed.bars(BarScale::Day, code, 0, FALLBACK_DEPTH);
        }
    };

    let mut bars = Vec::with_capacity(days.len());
    let mut prior_close = 0.0;
    for day in days {
        bars.push(Bar {
            time: day.date,
            prior_close,
            open: day.open,
            high: day.high,
            low: day.low,
            close: day.close,
            volume: day.volume,
            amount: day.amount,
        });
        prior_close = day.close;
    }

    Ok(BarSeries::from_bars(bars))
}

/// Stock history bounded to `limit` bars, most recent kept.
pub fn stock_history(
    feed: &dyn MarketFeed,
    code: &str,
    period: Period,
    limit: usize,
) -> Result<BarSeries, FeedError> {
    match FetchPlan::for_period(period) {
        FetchPlan::Fixed(scale) => feed.bars(scale, code, 0, bounded(limit)),
        FetchPlan::AdjustedDaily => Ok(trim(
            adjusted_daily_series(feed, code)?,
            limit,
            TrimPolicy::Tail,
        )),
        FetchPlan::Resampled(sample) => {
            let daily = adjusted_daily_series(feed, code)?;
            Ok(trim(resample(&daily, sample), limit, TrimPolicy::Tail))
        }
    }
}

/// Full-depth stock history for chart rendering; no window applied.
pub fn stock_chart(feed: &dyn MarketFeed, code: &str, period: Period) -> Result<BarSeries, FeedError> {
    match FetchPlan::for_period(period) {
        FetchPlan::Fixed(scale) => feed.bars(scale, code, 0, FALLBACK_DEPTH),
        FetchPlan::AdjustedDaily => adjusted_daily_series(feed, code),
        FetchPlan::Resampled(sample) => {
            let daily = adjusted_daily_series(feed, code)?;
            Ok(resample(&daily, sample))
        }
    }
}

/// Index history bounded to `limit` bars.
///
/// Indices have no adjustment concept; daily bars come straight from the
/// unadjusted index fetch, and weekly/monthly bars from the pre-aggregated
/// fetch with the earliest `limit` entries kept.
pub fn index_history(
    feed: &dyn MarketFeed,
    code: &str,
    period: Period,
    limit: usize,
) -> Result<BarSeries, FeedError> {
    match FetchPlan::for_period(period) {
        FetchPlan::Fixed(scale) => feed.index_bars(scale, code, 0, bounded(limit)),
        FetchPlan::AdjustedDaily => feed.index_daily(code, 0, bounded(limit)),
        FetchPlan::Resampled(sample) => Ok(trim(
            feed.index_period_all(sample, code)?,
            limit,
            TrimPolicy::Head,
        )),
    }
}

fn bounded(limit: usize) -> u16 {
    limit.min(MAX_LIMIT) as u16
}
