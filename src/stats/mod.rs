use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Counters for one scraping run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapingStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub requests: usize,
    pub failed_requests: usize,
    pub retries: usize,
    pub bytes_downloaded: usize,
    pub status_codes: BTreeMap<u16, usize>,
    pub retry_reasons: BTreeMap<String, usize>,
    pub response_time_ms: i64,
}

impl ScrapingStats {
    fn new() -> Self {
        Self {
            start_time: Utc::now(),
            end_time: None,
            requests: 0,
            failed_requests: 0,
            retries: 0,
            bytes_downloaded: 0,
            status_codes: BTreeMap::new(),
            retry_reasons: BTreeMap::new(),
            response_time_ms: 0,
        }
    }

    /// Mean time per completed request, retries and backoff included.
    pub fn average_response_ms(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.response_time_ms as f64 / self.requests as f64
    }

    pub fn elapsed(&self) -> Duration {
        self.end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(self.start_time)
    }
}

/// Shared handle on a run's [`ScrapingStats`].
#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapingStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapingStats::new())),
        }
    }

    /// Records the final response of a request lifecycle.
    pub fn record_request(&self, status: u16, size: usize, duration: Duration) {
        let mut stats = self.stats.write();
        stats.requests += 1;
        if !(200..300).contains(&status) {
            stats.failed_requests += 1;
        }
        *stats.status_codes.entry(status).or_default() += 1;
        stats.bytes_downloaded += size;
        stats.response_time_ms += duration.num_milliseconds();
    }

    pub fn record_retry(&self, reason: String) {
        let mut stats = self.stats.write();
        stats.retries += 1;
        *stats.retry_reasons.entry(reason).or_default() += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn snapshot(&self) -> ScrapingStats {
        self.stats.read().clone()
    }

    pub fn log_summary(&self) {
        let stats = self.stats.read();
        info!(
            "Scraping finished in {}s: {} requests ({} failed), {} retries, {:.2} MB, avg {:.2}ms",
            stats.elapsed().num_seconds(),
            stats.requests,
            stats.failed_requests,
            stats.retries,
            stats.bytes_downloaded as f64 / 1_000_000.0,
            stats.average_response_ms()
        );

        match serde_json::to_string(&*stats) {
            Ok(json) => debug!("Scraping statistics: {}", json),
            Err(e) => debug!("Could not serialize scraping statistics: {}", e),
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
