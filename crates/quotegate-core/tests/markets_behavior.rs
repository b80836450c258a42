mod common;

use std::collections::HashMap;

use common::ScriptedFeed;
use quotegate_core::{
    code_directory, market_stats, search, Exchange, InstrumentListing, SEARCH_CAP,
};

fn shanghai_stocks(count: usize, name_stem: &str) -> Vec<InstrumentListing> {
    (0..count)
        .map(|i| {
            InstrumentListing::new(
                Exchange::Shanghai,
                format!("{:06}", 600_000 + i),
                format!("{name_stem} {i}"),
                0.5,
            )
        })
        .collect()
}

fn shenzhen_stocks(count: usize, name_stem: &str) -> Vec<InstrumentListing> {
    (0..count)
        .map(|i| {
            InstrumentListing::new(
                Exchange::Shenzhen,
                format!("{:06}", i + 1),
                format!("{name_stem} {i}"),
                -0.5,
            )
        })
        .collect()
}

#[test]
fn search_caps_at_fifty_and_short_circuits() {
    let mut listings = HashMap::new();
    listings.insert(Exchange::Shanghai, Some(shanghai_stocks(80, "Alpha")));
    listings.insert(Exchange::Shenzhen, Some(shenzhen_stocks(80, "Alpha")));
    let feed = ScriptedFeed {
        listings,
        ..ScriptedFeed::default()
    };

    let hits = search(&feed, "Alpha");

    assert_eq!(hits.len(), SEARCH_CAP);
    let calls = feed.listing_calls.lock().expect("lock poisoned");
    assert_eq!(calls.as_slice(), &[Exchange::Shanghai]);
}

#[test]
fn search_matching_is_case_sensitive() {
    let mut listings = HashMap::new();
    listings.insert(Exchange::Shanghai, Some(shanghai_stocks(3, "Alpha")));
    listings.insert(Exchange::Shenzhen, Some(Vec::new()));
    listings.insert(Exchange::Beijing, Some(Vec::new()));
    let feed = ScriptedFeed {
        listings,
        ..ScriptedFeed::default()
    };

    assert_eq!(search(&feed, "alpha").len(), 0);
    assert_eq!(search(&feed, "Alpha").len(), 3);
}

#[test]
fn search_skips_failed_partitions_silently() {
    let mut listings = HashMap::new();
    listings.insert(Exchange::Shanghai, None);
    listings.insert(Exchange::Shenzhen, Some(shenzhen_stocks(4, "Beta")));
    listings.insert(Exchange::Beijing, Some(Vec::new()));
    let feed = ScriptedFeed {
        listings,
        ..ScriptedFeed::default()
    };

    let hits = search(&feed, "Beta");

    assert_eq!(hits.len(), 4);
    let calls = feed.listing_calls.lock().expect("lock poisoned");
    assert_eq!(calls.len(), 3);
}

#[test]
fn search_matches_code_substring_and_filters_non_stock() {
    let mut listings = HashMap::new();
    listings.insert(
        Exchange::Shanghai,
        Some(vec![
            InstrumentListing::new(Exchange::Shanghai, "600519", "Baijiu", 1.0),
            // Index code also contains "519" but must not appear in results.
            InstrumentListing::new(Exchange::Shanghai, "000519", "Some Index", 1.0),
        ]),
    );
    listings.insert(Exchange::Shenzhen, Some(Vec::new()));
    listings.insert(Exchange::Beijing, Some(Vec::new()));
    let feed = ScriptedFeed {
        listings,
        ..ScriptedFeed::default()
    };

    let hits = search(&feed, "519");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code, "600519");
}

#[test]
fn stats_tallies_sum_to_partition_totals() {
    let mut sh = shanghai_stocks(10, "Up");
    for (i, listing) in sh.iter_mut().enumerate() {
        listing.last_price = match i % 3 {
            0 => 1.0,
            1 => -1.0,
            _ => 0.0,
        };
    }
    let mut listings = HashMap::new();
    listings.insert(Exchange::Shanghai, Some(sh));
    listings.insert(Exchange::Shenzhen, Some(shenzhen_stocks(6, "Down")));
    listings.insert(Exchange::Beijing, Some(Vec::new()));
    let feed = ScriptedFeed {
        listings,
        ..ScriptedFeed::default()
    };

    let stats = market_stats(&feed);

    assert_eq!(stats.sh.total, 10);
    assert_eq!(stats.sh.up + stats.sh.down + stats.sh.flat, stats.sh.total);
    assert_eq!(stats.sh.up, 4);
    assert_eq!(stats.sh.down, 3);
    assert_eq!(stats.sh.flat, 3);
    assert_eq!(stats.sz.down, 6);
    assert_eq!(stats.bj.total, 0);
}

#[test]
fn stats_tolerate_a_failed_partition() {
    let mut listings = HashMap::new();
    listings.insert(Exchange::Shanghai, None);
    listings.insert(Exchange::Shenzhen, Some(shenzhen_stocks(5, "Gamma")));
    listings.insert(Exchange::Beijing, Some(Vec::new()));
    let feed = ScriptedFeed {
        listings,
        ..ScriptedFeed::default()
    };

    let stats = market_stats(&feed);

    assert_eq!(stats.sh.total, 0);
    assert_eq!(stats.sz.total, 5);
}

#[test]
fn directory_filter_restricts_to_one_partition() {
    let mut listings = HashMap::new();
    listings.insert(Exchange::Shanghai, Some(shanghai_stocks(3, "A")));
    listings.insert(Exchange::Shenzhen, Some(shenzhen_stocks(2, "B")));
    listings.insert(Exchange::Beijing, Some(Vec::new()));
    let feed = ScriptedFeed {
        listings,
        ..ScriptedFeed::default()
    };

    let directory = code_directory(&feed, Some("sz"));

    assert_eq!(directory.total, 2);
    assert_eq!(directory.exchanges.get("sz"), Some(&2));
    assert!(directory.exchanges.get("sh").is_none());
    let calls = feed.listing_calls.lock().expect("lock poisoned");
    assert_eq!(calls.as_slice(), &[Exchange::Shenzhen]);
}

#[test]
fn directory_unknown_filter_scans_all_partitions() {
    let mut listings = HashMap::new();
    listings.insert(Exchange::Shanghai, Some(shanghai_stocks(3, "A")));
    listings.insert(Exchange::Shenzhen, Some(shenzhen_stocks(2, "B")));
    listings.insert(Exchange::Beijing, Some(Vec::new()));
    let feed = ScriptedFeed {
        listings,
        ..ScriptedFeed::default()
    };

    let directory = code_directory(&feed, Some("nasdaq"));

    assert_eq!(directory.total, 5);
    assert_eq!(directory.exchanges.len(), 3);
}
