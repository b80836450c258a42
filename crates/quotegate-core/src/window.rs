//! Output-size bounding for bar series.
//!
//! Stock history keeps the most recent bars (tail), index weekly/monthly
//! history keeps the earliest (head). The two policies are deliberately kept
//! separate because unifying them would change observable output.

use serde::{Deserialize, Serialize};

use crate::domain::BarSeries;

/// Default window when the caller supplies no usable limit.
pub const DEFAULT_LIMIT: usize = 100;
/// Hard cap on any requested window.
pub const MAX_LIMIT: usize = 800;

/// Which end of the series survives a trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrimPolicy {
    /// Keep the most recent `limit` bars.
    Tail,
    /// Keep the earliest `limit` bars.
    Head,
}

/// Bound a series to at most `limit` bars, resyncing its count.
pub fn trim(mut series: BarSeries, limit: usize, policy: TrimPolicy) -> BarSeries {
    if series.bars.len() > limit {
        match policy {
            TrimPolicy::Tail => {
                let drop = series.bars.len() - limit;
                series.bars.drain(..drop);
            }
            TrimPolicy::Head => series.bars.truncate(limit),
        }
        series.count = series.bars.len();
    }
    series
}

/// Parse a caller-supplied limit parameter.
///
/// Missing, non-numeric or non-positive input falls back to
/// [`DEFAULT_LIMIT`]; anything above [`MAX_LIMIT`] is clamped.
pub fn parse_limit(raw: Option<&str>) -> usize {
    match raw.and_then(|value| value.trim().parse::<i64>().ok()) {
        Some(value) if value > 0 => (value as usize).min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}
