use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;

use super::Scraper;
use crate::core::retry::RetryConfig;
use crate::core::ScraperConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::{ScraperResult, StatsTracker};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct HttpScraper {
    client: Client,
    retry_config: RetryConfig,
    stats: StatsTracker,
}

impl HttpScraper {
    /// Builds a client carrying the timeout, headers and retry policy of
    /// `config`.
    pub fn from_config(config: &ScraperConfig) -> ScraperResult<Self> {
        Self::build(&config.headers, config.timeout, config.retry.clone())
    }

    fn build(
        headers: &[(String, String)],
        timeout: Option<Duration>,
        retry_config: RetryConfig,
    ) -> ScraperResult<Self> {
        let mut header_map = header::HeaderMap::new();
        header_map.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(DEFAULT_USER_AGENT),
        );

        for (key, value) in headers {
            let name = header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| crate::ScraperError::InvalidHeader(e.to_string()))?;
            let value = header::HeaderValue::from_str(value)
                .map_err(|e| crate::ScraperError::InvalidHeader(e.to_string()))?;
            header_map.insert(name, value);
        }

        let mut builder = ClientBuilder::new().default_headers(header_map);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            retry_config,
            stats: StatsTracker::new(),
        })
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(&self, request: &HttpRequest) -> ScraperResult<HttpResponse> {
        let timestamp = Utc::now();
        let response = self.client.get(request.url.clone()).send().await?;
        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);
        // `text` consumes the response, releasing the connection.
        let body = response.text().await?;

        Ok(HttpResponse {
            url: request.url.clone(),
            status,
            headers,
            body,
            timestamp,
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
