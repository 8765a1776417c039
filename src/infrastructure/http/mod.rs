mod retry;

pub use retry::{
    DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF, RetryPolicy, is_retryable,
};

use std::time::Duration;

use reqwest::Client;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared HTTP client for the outbound adapters.
pub fn build_http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("reqwest client build never fails with valid TLS config")
}
