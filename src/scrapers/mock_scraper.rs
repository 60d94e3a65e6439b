use crate::core::retry::RetryConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::{ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

use super::Scraper;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

/// Canned-response scraper. Requests whose URL contains a registered
/// route pattern get that route's response; anything else is served
/// from the fallback sequence, which cycles.
pub struct MockScraper {
    routes: Vec<(String, MockResponse)>,
    responses: Vec<MockResponse>,
    current_response: AtomicUsize,
    requested: Mutex<Vec<Url>>,
    retry_config: RetryConfig,
    stats: StatsTracker,
}

impl Default for MockScraper {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MockScraper {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            routes: Vec::new(),
            responses,
            current_response: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            retry_config: RetryConfig::default(),
            stats: StatsTracker::new(),
        }
    }

    pub fn with_route(mut self, pattern: &str, response: MockResponse) -> Self {
        self.routes.push((pattern.to_string(), response));
        self
    }

    pub fn with_retry(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Every URL passed to `fetch_single`, in call order.
    pub fn requested_urls(&self) -> Vec<Url> {
        self.requested.lock().clone()
    }

    fn next_response(&self, url: &Url) -> MockResponse {
        let url_str = url.as_str();
        if let Some((_, response)) = self
            .routes
            .iter()
            .find(|(pattern, _)| url_str.contains(pattern.as_str()))
        {
            return response.clone();
        }

        if self.responses.is_empty() {
            return MockResponse::new(404, "Not Found");
        }
        let index = self.current_response.fetch_add(1, Ordering::SeqCst);
        self.responses[index % self.responses.len()].clone()
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(&self, request: &HttpRequest) -> ScraperResult<HttpResponse> {
        self.requested.lock().push(request.url.clone());
        let response = self.next_response(&request.url);

        Ok(HttpResponse {
            url: request.url.clone(),
            status: response.status,
            headers: HashMap::new(),
            body: response.body,
            timestamp: Utc::now(),
            retry_count: 0,
            retry_history: HashMap::new(),
        })
    }

    fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }
}
