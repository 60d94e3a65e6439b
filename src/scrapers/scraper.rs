use crate::core::retry::{RetryConfig, RetryState};
use crate::http::{HttpRequest, HttpResponse};
use crate::{ScraperError, ScraperResult, StatsTracker};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use tokio::time::sleep;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Issues exactly one request. The response body is fully read before
    /// returning, so no connection outlives the call.
    async fn fetch_single(&self, request: &HttpRequest) -> ScraperResult<HttpResponse>;
    fn retry_config(&self) -> &RetryConfig;
    fn stats(&self) -> &StatsTracker;

    /// Fetches `request`, applying the retry policy, and fails on any
    /// non-2xx status the policy did not recover from.
    async fn fetch(&self, request: &HttpRequest) -> ScraperResult<HttpResponse> {
        let start_time = Utc::now();
        let mut state = RetryState::new();

        loop {
            info!("Fetching URL: {}", request.url);
            let response = self.fetch_single(request).await?;
            debug!(
                "Received response: status={}, body_length={}",
                response.status,
                response.body.len()
            );

            if let Some((category, delay)) =
                self.retry_config()
                    .should_retry(&mut state, response.status, &response.body)
            {
                self.stats().record_retry(format!("{:?}", category));
                warn!(
                    "Retry triggered for URL: {} (category={:?}, attempt={}/{}, delay={:?})",
                    request.url,
                    category,
                    state.counts.get(&category).copied().unwrap_or(0),
                    self.retry_config()
                        .categories
                        .get(&category)
                        .map(|c| c.max_retries)
                        .unwrap_or(0),
                    delay
                );

                sleep(delay).await;
                continue;
            }

            let duration = Utc::now().signed_duration_since(start_time);
            self.stats()
                .record_request(response.status, response.body.len(), duration);

            if !response.is_success() {
                return Err(ScraperError::StatusError {
                    url: request.url.to_string(),
                    status: response.status,
                });
            }

            info!(
                "Request completed for URL: {} (total_retries={}, status={})",
                request.url, state.total_retries, response.status
            );

            return Ok(HttpResponse {
                retry_count: state.total_retries,
                retry_history: state.counts,
                ..response
            });
        }
    }
}
