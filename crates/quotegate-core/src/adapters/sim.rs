use time::Duration;

use crate::domain::{
    Bar, BarSeries, Exchange, InstrumentListing, IntradayCurve, MinutePoint, PriceLevel,
    QuoteSnapshot, TickTrade, TradeLog, TradeSide, UtcTimestamp,
};
use crate::feed::{AdjustedDay, BarScale, FeedError, MarketFeed};
use crate::resample::{resample, SamplePeriod};

/// Depth of the simulated adjusted daily history.
const ADJUSTED_DEPTH: usize = 900;
/// Trading minutes per session (09:30-11:30, 13:00-15:00).
const SESSION_MINUTES: usize = 240;

/// Deterministic in-memory market feed.
///
/// Synthesizes stable per-code price paths, listings for all three
/// partitions, intraday curves and tick trades. Serves as the default feed
/// for the binary and as the happy-path double in tests.
#[derive(Debug, Clone, Default)]
pub struct SimFeed;

impl SimFeed {
    fn daily_ending_now(&self, code: &str, count: usize) -> Vec<(UtcTimestamp, Candle)> {
        self.path_ending_now(code, Duration::days(1), count)
    }

    fn path_ending_now(
        &self,
        code: &str,
        step: Duration,
        count: usize,
    ) -> Vec<(UtcTimestamp, Candle)> {
        let seed = code_seed(code);
        let now = UtcTimestamp::now();
        (0..count)
            .map(|index| {
                let offset = step * (count.saturating_sub(index + 1) as i32);
                (now.minus(offset), candle(seed, index as u64))
            })
            .collect()
    }

    fn bar_series(&self, code: &str, step: Duration, count: usize) -> BarSeries {
        let mut prior_close = 0.0;
        let bars = self
            .path_ending_now(code, step, count)
            .into_iter()
            .map(|(time, candle)| {
                let bar = Bar {
                    time,
                    prior_close,
                    open: candle.open,
                    high: candle.high,
                    low: candle.low,
                    close: candle.close,
                    volume: candle.volume,
                    amount: candle.amount,
                };
                prior_close = candle.close;
                bar
            })
            .collect();
        BarSeries::from_bars(bars)
    }
}

impl MarketFeed for SimFeed {
    fn quotes(&self, codes: &[String]) -> Result<Vec<QuoteSnapshot>, FeedError> {
        let time = UtcTimestamp::now();
        Ok(codes
            .iter()
            .map(|code| {
                let seed = code_seed(code);
                let last = base_price(seed) + (seed % 90) as f64 / 100.0;
                let spread = 0.01;
                let bids = (0..5)
                    .map(|level| PriceLevel {
                        price: round2(last - spread * (level + 1) as f64),
                        volume: 1_000 + (seed + level as u64) % 4_000,
                    })
                    .collect();
                let asks = (0..5)
                    .map(|level| PriceLevel {
                        price: round2(last + spread * (level + 1) as f64),
                        volume: 1_000 + (seed + 7 + level as u64) % 4_000,
                    })
                    .collect();
                QuoteSnapshot {
                    code: code.clone(),
                    name: listing_name(code),
                    last: round2(last),
                    prior_close: round2(last - 0.12),
                    open: round2(last - 0.05),
                    high: round2(last + 0.30),
                    low: round2(last - 0.35),
                    volume: 2_000_000 + seed % 900_000,
                    amount: round2(last * 2_000_000.0),
                    bids,
                    asks,
                    time,
                }
            })
            .collect())
    }

    fn bars(
        &self,
        scale: BarScale,
        code: &str,
        start: u16,
        count: u16,
    ) -> Result<BarSeries, FeedError> {
        let _ = start;
        Ok(self.bar_series(code, scale_step(scale), count as usize))
    }

    fn adjusted_daily(&self, code: &str) -> Result<Vec<AdjustedDay>, FeedError> {
        Ok(self
            .daily_ending_now(code, ADJUSTED_DEPTH)
            .into_iter()
            .map(|(date, candle)| AdjustedDay {
                date,
                open: candle.open,
                high: candle.high,
                low: candle.low,
                close: candle.close,
                volume: candle.volume,
                amount: candle.amount,
            })
            .collect())
    }

    fn intraday(&self, date: &str, code: &str) -> Result<IntradayCurve, FeedError> {
        let seed = code_seed(code).wrapping_add(code_seed(date));
        let base = base_price(seed);
        let mut cumulative = 0.0;
        let points = (0..SESSION_MINUTES)
            .map(|minute| {
                let price = round2(base + ((seed + minute as u64) % 40) as f64 / 100.0 - 0.2);
                cumulative += price;
                MinutePoint {
                    time: session_minute(minute),
                    price,
                    avg_price: round2(cumulative / (minute + 1) as f64),
                    volume: 4_000 + (seed + minute as u64) % 9_000,
                }
            })
            .collect();
        Ok(IntradayCurve::from_points(points))
    }

    fn recent_trades(&self, code: &str, start: u16, count: u16) -> Result<TradeLog, FeedError> {
        let _ = start;
        Ok(trade_log(code_seed(code), count as usize))
    }

    fn trades_on(&self, date: &str, code: &str) -> Result<TradeLog, FeedError> {
        let seed = code_seed(code).wrapping_add(code_seed(date));
        Ok(trade_log(seed, SESSION_MINUTES))
    }

    fn listings(&self, exchange: Exchange) -> Result<Vec<InstrumentListing>, FeedError> {
        Ok(sim_catalog(exchange))
    }

    fn index_bars(
        &self,
        scale: BarScale,
        code: &str,
        start: u16,
        count: u16,
    ) -> Result<BarSeries, FeedError> {
        let _ = start;
        Ok(self.bar_series(code, scale_step(scale), count as usize))
    }

    fn index_daily(&self, code: &str, start: u16, count: u16) -> Result<BarSeries, FeedError> {
        let _ = start;
        Ok(self.bar_series(code, Duration::days(1), count as usize))
    }

    fn index_period_all(&self, period: SamplePeriod, code: &str) -> Result<BarSeries, FeedError> {
        let daily = self.bar_series(code, Duration::days(1), ADJUSTED_DEPTH);
        Ok(resample(&daily, period))
    }
}

#[derive(Debug, Clone, Copy)]
struct Candle {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    amount: f64,
}

fn candle(seed: u64, index: u64) -> Candle {
    let base = base_price(seed);
    let open = round2(base + ((seed + index * 7) % 120) as f64 / 100.0);
    let delta = ((seed + index * 13) % 41) as f64 / 100.0 - 0.2;
    let close = round2(open + delta);
    let high = round2(open.max(close) + 0.15);
    let low = round2(open.min(close) - 0.15);
    let volume = 50_000 + (seed + index * 31) % 120_000;
    Candle {
        open,
        high,
        low,
        close,
        volume,
        amount: round2(close * volume as f64),
    }
}

fn base_price(seed: u64) -> f64 {
    5.0 + (seed % 2_000) as f64 / 100.0
}

fn code_seed(code: &str) -> u64 {
    code.bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn scale_step(scale: BarScale) -> Duration {
    match scale {
        BarScale::Minute1 => Duration::minutes(1),
        BarScale::Minute5 => Duration::minutes(5),
        BarScale::Minute15 => Duration::minutes(15),
        BarScale::Minute30 => Duration::minutes(30),
        BarScale::Hour => Duration::hours(1),
        BarScale::Day => Duration::days(1),
    }
}

/// Map a session minute index onto its `HH:MM` wall-clock label.
fn session_minute(minute: usize) -> String {
    let absolute = if minute < 120 {
        9 * 60 + 30 + minute
    } else {
        13 * 60 + (minute - 120)
    };
    format!("{:02}:{:02}", absolute / 60, absolute % 60)
}

fn trade_log(seed: u64, count: usize) -> TradeLog {
    let base = base_price(seed);
    let trades = (0..count)
        .map(|index| {
            let minute = index % SESSION_MINUTES;
            let side = match (seed + index as u64) % 3 {
                0 => TradeSide::Buy,
                1 => TradeSide::Sell,
                _ => TradeSide::Neutral,
            };
            TickTrade {
                time: session_minute(minute),
                price: round2(base + ((seed + index as u64) % 30) as f64 / 100.0),
                volume: 100 + (seed + index as u64) % 2_000,
                side,
            }
        })
        .collect();
    TradeLog::from_trades(trades)
}

fn listing_name(code: &str) -> String {
    format!("SIM {code}")
}

fn sim_catalog(exchange: Exchange) -> Vec<InstrumentListing> {
    let mut listings = Vec::new();
    let push = |listings: &mut Vec<InstrumentListing>, code: String| {
        let seed = code_seed(&code);
        let last_price = match seed % 5 {
            0 => 0.0,
            1 | 2 => (seed % 300) as f64 / 100.0 + 0.01,
            _ => -((seed % 300) as f64 / 100.0) - 0.01,
        };
        let name = listing_name(&code);
        listings.push(InstrumentListing::new(exchange, code, name, last_price));
    };

    match exchange {
        Exchange::Shanghai => {
            for i in 0..60 {
                push(&mut listings, format!("{:06}", 600_000 + i));
            }
            push(&mut listings, String::from("688981"));
            // Indices and funds are listed but filtered out of equity views.
            push(&mut listings, String::from("000001"));
            push(&mut listings, String::from("000300"));
            push(&mut listings, String::from("510050"));
        }
        Exchange::Shenzhen => {
            for i in 1..=40 {
                push(&mut listings, format!("{i:06}"));
            }
            push(&mut listings, String::from("300750"));
            push(&mut listings, String::from("399001"));
            push(&mut listings, String::from("159915"));
        }
        Exchange::Beijing => {
            for i in 0..20 {
                push(&mut listings, format!("{:06}", 830_000 + i * 37));
            }
        }
    }

    listings
}
