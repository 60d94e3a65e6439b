use super::types::*;
use super::utils::*;
use std::collections::HashMap;
use std::time::Duration;

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_policy: BackoffPolicy::Exponential { factor: 2.0 },
            conditions: Vec::new(),
        }
    }
}

impl Default for RetryState {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryState {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            total_retries: 0,
        }
    }
}

impl RetryConfig {
    /// Retry policy covering rate limiting and server errors, both with
    /// exponential backoff capped at `max_retries` attempts.
    pub fn transient(max_retries: usize) -> Self {
        let mut config = Self::default();
        config.categories.insert(
            RetryCategory::RateLimit,
            CategoryConfig {
                max_retries,
                conditions: vec![
                    RetryCondition::StatusCode(429),
                    RetryCondition::Content(ContentRetryCondition {
                        pattern: "rate limit|too many requests".to_string(),
                        is_regex: true,
                    }),
                ],
                ..Default::default()
            },
        );
        config.categories.insert(
            RetryCategory::ServerError,
            CategoryConfig {
                max_retries,
                conditions: vec![RetryCondition::StatusRange { from: 500, to: 599 }],
                ..Default::default()
            },
        );
        config
    }

    pub fn is_enabled(&self) -> bool {
        self.categories.values().any(|c| c.max_retries > 0)
    }

    /// Checks the response against every category that still has
    /// attempts left. On a match the state is advanced and the delay to
    /// wait before the next attempt is returned.
    pub fn should_retry(
        &self,
        state: &mut RetryState,
        status: u16,
        content: &str,
    ) -> Option<(RetryCategory, Duration)> {
        for (category, config) in &self.categories {
            let current_retries = state.counts.get(category).copied().unwrap_or(0);
            if current_retries >= config.max_retries {
                continue;
            }

            if config
                .conditions
                .iter()
                .any(|condition| retry_condition_should_apply(condition, status, content))
            {
                state.counts.insert(category.clone(), current_retries + 1);
                state.total_retries += 1;
                let delay = calculate_delay(config, current_retries);
                return Some((category.clone(), delay));
            }
        }
        None
    }
}

impl CategoryConfig {
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        calculate_delay(self, attempt)
    }
}
