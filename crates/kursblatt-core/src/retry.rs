//! Single-retry policy for upstream calls.

use std::time::Duration;

use crate::http::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Retry policy applied to every provider request. One retry with a
/// fixed pause is the default; `no_retry` disables the mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Fixed pause between attempts.
    pub backoff: Duration,
    /// HTTP status codes that trigger a retry.
    pub retry_on_status: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_millis(500),
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }
}

/// Execute a request, retrying per the policy on retryable transport
/// errors and on retryable status codes. The last outcome is returned
/// unchanged once the attempt budget is spent.
pub async fn send_with_retry(
    client: &dyn HttpClient,
    policy: &RetryPolicy,
    request: HttpRequest,
) -> Result<HttpResponse, HttpError> {
    let mut attempt = 0;
    loop {
        let outcome = client.execute(request.clone()).await;

        let retry = match &outcome {
            Ok(response) => policy.should_retry_status(response.status),
            Err(error) => error.retryable(),
        };

        if !retry || attempt >= policy.max_retries {
            return outcome;
        }

        attempt += 1;
        tokio::time::sleep(policy.backoff).await;
    }
}
