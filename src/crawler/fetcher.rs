//! HTTP fetcher implementation
//!
//! One fetch is one GET with a hard timeout, retried under a bounded linear
//! backoff policy. Backoff is linear rather than exponential on purpose: it
//! acts as a conservative rate limit against the target server, not as an
//! aggressive retry scheme.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Bounded retry policy for one fetch
///
/// Standing alone so the backoff law can be tested without a network:
/// attempt `n` (1-based) waits `backoff_base * n` before the next try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total fetch attempts per URL (at least 1)
    pub max_attempts: u32,

    /// Linear backoff base
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// Delay to wait after a failed attempt (1-based) before the next one
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }
}

/// Terminal fetch failure after all retries were exhausted
///
/// The crawler treats this as "skip page", never as a fatal abort.
#[derive(Debug, Clone)]
pub struct FetchError {
    pub url: String,
    pub last_cause: String,
}

impl From<FetchError> for crate::ChartrakeError {
    fn from(e: FetchError) -> Self {
        crate::ChartrakeError::Fetch {
            url: e.url,
            last_cause: e.last_cause,
        }
    }
}

/// Builds the HTTP client used for the whole run
///
/// User agent format: `Name/Version (+ContactUrl; ContactEmail)`.
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page, retrying transport failures and non-2xx statuses
///
/// Returns the body on the first successful attempt. After exhausting the
/// policy's attempts, returns a [`FetchError`] carrying the last cause.
pub async fn fetch_page(client: &Client, url: &Url, policy: &RetryPolicy) -> Result<String, FetchError> {
    let mut last_cause = String::from("no attempts made");

    for attempt in 1..=policy.max_attempts.max(1) {
        match client.get(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    match response.text().await {
                        Ok(body) => return Ok(body),
                        Err(e) => {
                            last_cause = format!("body read failed: {}", e);
                        }
                    }
                } else {
                    last_cause = format!("HTTP {}", status.as_u16());
                }
            }
            Err(e) => {
                last_cause = if e.is_timeout() {
                    "request timeout".to_string()
                } else if e.is_connect() {
                    "connection refused".to_string()
                } else {
                    e.to_string()
                };
            }
        }

        if attempt < policy.max_attempts {
            tracing::warn!(
                "GET {} failed (attempt {}/{}): {}",
                url,
                attempt,
                policy.max_attempts,
                last_cause
            );
            tokio::time::sleep(policy.delay_for(attempt)).await;
        }
    }

    tracing::warn!(
        "Giving up on {} after {} attempts: {}",
        url,
        policy.max_attempts,
        last_cause
    );

    Err(FetchError {
        url: url.to_string(),
        last_cause,
    })
}
