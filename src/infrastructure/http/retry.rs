use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Bounded exponential backoff for transport failures, HTTP 5xx and 429.
///
/// Any other response, success or not, is returned to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Sends the request built by `build`, rebuilding it for every attempt.
    pub async fn send<F>(&self, operation: &str, mut build: F) -> Result<Response, reqwest::Error>
    where
        F: FnMut() -> RequestBuilder,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut backoff = self.initial_backoff;
        let mut attempt = 1;

        loop {
            let delay = match build().send().await {
                Ok(response) if attempt < max_attempts && is_retryable(response.status()) => {
                    let delay = retry_after(&response).unwrap_or(backoff).min(self.max_backoff);
                    tracing::warn!(
                        operation,
                        attempt,
                        status = %response.status(),
                        delay_ms = delay.as_millis() as u64,
                        "Retryable response, backing off"
                    );
                    delay
                }
                Err(e) if attempt < max_attempts && is_transient(&e) => {
                    tracing::warn!(
                        operation,
                        attempt,
                        error = %e,
                        delay_ms = backoff.as_millis() as u64,
                        "Transport failure, backing off"
                    );
                    backoff
                }
                outcome => return outcome,
            };

            tokio::time::sleep(delay).await;
            attempt += 1;
            backoff = (backoff * 2).min(self.max_backoff);
        }
    }
}

pub fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
