use serde::{Deserialize, Serialize};

use crate::UtcTimestamp;

/// One level of the five-level order book carried by a quote snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub volume: u64,
}

/// Five-level depth quote for a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub code: String,
    pub name: String,
    pub last: f64,
    pub prior_close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
    pub amount: f64,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
    pub time: UtcTimestamp,
}

/// One per-minute observation of the intraday price curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinutePoint {
    /// Wall-clock minute in `HH:MM` exchange-local form.
    pub time: String,
    pub price: f64,
    pub avg_price: f64,
    pub volume: u64,
}

/// Full intraday per-minute curve for one trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayCurve {
    pub count: usize,
    #[serde(rename = "list")]
    pub points: Vec<MinutePoint>,
}

impl IntradayCurve {
    pub fn from_points(points: Vec<MinutePoint>) -> Self {
        Self {
            count: points.len(),
            points,
        }
    }
}

/// Aggressor side of a tick trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
    Neutral,
}

/// One tick-by-tick trade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickTrade {
    pub time: String,
    pub price: f64,
    pub volume: u64,
    pub side: TradeSide,
}

/// Ordered tick trade log with its reported count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLog {
    pub count: usize,
    #[serde(rename = "list")]
    pub trades: Vec<TickTrade>,
}

impl TradeLog {
    pub fn from_trades(trades: Vec<TickTrade>) -> Self {
        Self {
            count: trades.len(),
            trades,
        }
    }
}
