use std::sync::Arc;
use std::time::Instant;

use quotegate_core::MarketFeed;

/// Shared per-process state: one long-lived feed handle plus start time.
///
/// The feed handle is injected rather than ambient so request handlers can
/// run against test doubles.
pub struct AppState {
    pub feed: Arc<dyn MarketFeed>,
    pub started: Instant,
}

impl AppState {
    pub fn new(feed: Arc<dyn MarketFeed>) -> Arc<Self> {
        Arc::new(Self {
            feed,
            started: Instant::now(),
        })
    }

    /// Human-readable process uptime for the status endpoint.
    pub fn uptime(&self) -> String {
        let total = self.started.elapsed().as_secs();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        format!("{hours}h {minutes:02}m {seconds:02}s")
    }
}
