//! Calendar-period resampling of daily bar series.
//!
//! A single ordered scan folds daily bars into week or month buckets. A
//! bucket's bar opens with its first constituent day and keeps absorbing
//! days until the bucket key changes; the final in-progress bucket is always
//! flushed so a series ending mid-period still reports its tail bucket.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::{Bar, BarSeries, UtcTimestamp};

/// Target calendar granularity for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplePeriod {
    Week,
    Month,
}

impl SamplePeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl Display for SamplePeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar bucket identity: ISO (week-year, week) or (year, month).
fn bucket_key(period: SamplePeriod, ts: UtcTimestamp) -> (i32, u8) {
    let date = ts.date();
    match period {
        SamplePeriod::Week => {
            let (year, week, _) = date.to_iso_week_date();
            (year, week)
        }
        SamplePeriod::Month => (date.year(), date.month() as u8),
    }
}

/// Aggregate an ordered daily series into one bar per calendar bucket.
///
/// Output bars report the timestamp of their latest constituent day and keep
/// the prior-close of their first. Empty input passes through unchanged.
pub fn resample(series: &BarSeries, period: SamplePeriod) -> BarSeries {
    if series.bars.is_empty() {
        return series.clone();
    }

    let mut output: Vec<Bar> = Vec::new();
    let mut current: Option<(Bar, (i32, u8))> = None;

    for bar in &series.bars {
        let key = bucket_key(period, bar.time);
        let same_bucket = matches!(&current, Some((_, current_key)) if *current_key == key);

        if same_bucket {
            if let Some((bucket, _)) = current.as_mut() {
                if bar.high > bucket.high {
                    bucket.high = bar.high;
                }
                // Zero doubles as the "unset low" sentinel; kept for
                // compatibility with the upstream series format.
                if bar.low < bucket.low || bucket.low == 0.0 {
                    bucket.low = bar.low;
                }
                bucket.close = bar.close;
                bucket.volume += bar.volume;
                bucket.amount += bar.amount;
                bucket.time = bar.time;
            }
        } else {
            if let Some((finished, _)) = current.take() {
                output.push(finished);
            }
            current = Some((*bar, key));
        }
    }

    // A series ending mid-period must not drop its tail bucket.
    if let Some((finished, _)) = current {
        output.push(finished);
    }

    BarSeries::from_bars(output)
}
