use serde::{Deserialize, Serialize};

use crate::UtcTimestamp;

/// OHLCV bar record for a given period.
///
/// `prior_close` is the close of the immediately preceding bar at the same
/// granularity; 0.0 marks the first bar of a sequence, where no prior close
/// exists. For aggregated bars, `time` is the timestamp of the last
/// constituent bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: UtcTimestamp,
    #[serde(rename = "last")]
    pub prior_close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub amount: f64,
}

/// Ordered bar sequence with its reported count.
///
/// Invariant: `count == bars.len()` at every point of return to a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub count: usize,
    #[serde(rename = "list")]
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn from_bars(bars: Vec<Bar>) -> Self {
        Self {
            count: bars.len(),
            bars,
        }
    }

    pub fn empty() -> Self {
        Self::from_bars(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
