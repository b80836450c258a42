mod common;

use common::{adjusted_day, day_bar, ScriptedFeed};
use quotegate_core::{
    adjusted_daily_series, index_history, stock_chart, stock_history, BarSeries, Period,
    FALLBACK_DEPTH,
};

#[test]
fn adjusted_path_synthesizes_prior_closes() {
    let feed = ScriptedFeed {
        adjusted: Some(vec![
            adjusted_day("2024-01-01", 10.0),
            adjusted_day("2024-01-02", 10.5),
            adjusted_day("2024-01-03", 10.2),
        ]),
        ..ScriptedFeed::default()
    };

    let series = adjusted_daily_series(&feed, "600519").expect("adjusted fetch");

    assert_eq!(series.count, 3);
    assert_eq!(series.bars[0].prior_close, 0.0);
    assert_eq!(series.bars[1].prior_close, 10.0);
    assert_eq!(series.bars[2].prior_close, 10.5);
}

#[test]
fn primary_failure_degrades_to_unadjusted_bars() {
    let fallback = BarSeries::from_bars(vec![
        day_bar("2024-01-02", 10.0),
        day_bar("2024-01-03", 10.4),
    ]);
    let feed = ScriptedFeed {
        adjusted: None,
        fallback_daily: Some(fallback.clone()),
        ..ScriptedFeed::default()
    };

    let series = adjusted_daily_series(&feed, "600519").expect("fallback must serve");

    assert_eq!(series, fallback);
    let requests = feed.fallback_requests.lock().expect("lock poisoned");
    assert_eq!(requests.as_slice(), &[FALLBACK_DEPTH]);
}

#[test]
fn both_sources_failing_is_an_error() {
    let feed = ScriptedFeed::default();
    assert!(adjusted_daily_series(&feed, "600519").is_err());
}

#[test]
fn day_history_keeps_most_recent_bars() {
    let feed = ScriptedFeed {
        adjusted: Some(
            (1..=20)
                .map(|day| adjusted_day(&format!("2024-01-{day:02}"), 10.0 + day as f64))
                .collect(),
        ),
        ..ScriptedFeed::default()
    };

    let series = stock_history(&feed, "600519", Period::Day, 5).expect("history");

    assert_eq!(series.count, 5);
    assert_eq!(series.bars[0].close, 26.0);
    assert_eq!(series.bars[4].close, 30.0);
}

#[test]
fn week_history_resamples_then_tail_trims() {
    // Three ISO weeks: W01 (01-01..01-05), W02 (01-08), W03 (01-15).
    let feed = ScriptedFeed {
        adjusted: Some(vec![
            adjusted_day("2024-01-01", 10.0),
            adjusted_day("2024-01-05", 10.5),
            adjusted_day("2024-01-08", 11.0),
            adjusted_day("2024-01-15", 11.5),
        ]),
        ..ScriptedFeed::default()
    };

    let series = stock_history(&feed, "600519", Period::Week, 2).expect("history");

    assert_eq!(series.count, 2);
    assert_eq!(series.bars[0].close, 11.0);
    assert_eq!(series.bars[1].close, 11.5);
}

#[test]
fn chart_variant_applies_no_window() {
    let feed = ScriptedFeed {
        adjusted: Some(
            (1..=28)
                .map(|day| adjusted_day(&format!("2024-01-{day:02}"), 10.0))
                .collect(),
        ),
        ..ScriptedFeed::default()
    };

    let day = stock_chart(&feed, "600519", Period::Day).expect("chart");
    assert_eq!(day.count, 28);

    // 2024-01-01 (Mon) through 01-28 (Sun) spans ISO weeks W01..W04.
    let week = stock_chart(&feed, "600519", Period::Week).expect("chart");
    assert_eq!(week.count, 4);
}

#[test]
fn unknown_period_token_behaves_as_day() {
    let feed = ScriptedFeed {
        adjusted: Some(vec![adjusted_day("2024-01-02", 10.0)]),
        ..ScriptedFeed::default()
    };

    let series = stock_history(&feed, "600519", Period::from_token("bogus"), 10).expect("history");
    assert_eq!(series.count, 1);
}

#[test]
fn index_week_history_keeps_earliest_bars() {
    let feed = ScriptedFeed {
        index_period: Some(BarSeries::from_bars(
            (1..=9)
                .map(|week| day_bar(&format!("2024-03-{:02}", week * 3), 20.0 + week as f64))
                .collect(),
        )),
        ..ScriptedFeed::default()
    };

    let series = index_history(&feed, "000001", Period::Week, 4).expect("index history");

    assert_eq!(series.count, 4);
    assert_eq!(series.bars[0].close, 21.0);
    assert_eq!(series.bars[3].close, 24.0);
}

#[test]
fn index_day_history_uses_direct_unadjusted_fetch() {
    let feed = ScriptedFeed {
        index_daily: Some(BarSeries::from_bars(
            (1..=10)
                .map(|day| day_bar(&format!("2024-02-{day:02}"), 30.0 + day as f64))
                .collect(),
        )),
        ..ScriptedFeed::default()
    };

    let series = index_history(&feed, "000001", Period::Day, 6).expect("index history");
    assert_eq!(series.count, 6);
}
