// src/fetch/retry.rs
// =============================================================================
// Fetch-with-retry: the one primitive every network call in the pipeline goes
// through.
//
// How it works:
// 1. If the target is an absolute http(s) URL, route it through the proxy:
//    <proxy base> + percent-encoded target
//    Anything else is assumed to already be a proxy URL and is used as-is.
// 2. Try the GET up to `max_attempts` times
// 3. After failed attempt N, sleep `base_delay * N` (linear backoff)
// 4. After the last failed attempt, give up with a FetchError
//
// The sleep is tokio's, so only the scrape task waits; the rest of the
// process keeps running.
// =============================================================================

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{FetchResult, Transport, TransportError};

// How persistent fetch-with-retry is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait after the first failure; later waits grow linearly
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    // Backoff after failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

// Every attempt failed
#[derive(Debug, Error)]
#[error("giving up on {target} after {attempts} attempt(s): {source}")]
pub struct FetchError {
    /// The URL the caller asked for (before proxy rewriting)
    pub target: String,
    pub attempts: u32,
    /// The failure of the final attempt
    pub source: TransportError,
}

// Wraps a Transport with proxy routing and the retry loop
pub struct Fetcher<T> {
    transport: T,
    proxy_base: String,
    policy: RetryPolicy,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, proxy_base: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            proxy_base: with_trailing_slash(proxy_base.into()),
            policy,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // Works out the URL we actually GET for a target
    pub fn proxy_url(&self, target: &str) -> String {
        if is_absolute_http(target) {
            format!("{}{}", self.proxy_base, urlencoding::encode(target))
        } else {
            target.to_string()
        }
    }

    // Fetches `target`, retrying with linear backoff.
    //
    // Returns the first successful result, or the last attempt's error once
    // all attempts are used up.
    pub async fn fetch(&self, target: &str) -> Result<FetchResult, FetchError> {
        let url = self.proxy_url(target);
        // Zero attempts makes no sense; always try at least once
        let max_attempts = self.policy.max_attempts.max(1);

        let mut attempt = 1;
        loop {
            debug!(url = %url, attempt, "Fetching URL");

            match self.transport.get(&url).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    warn!(url = %target, attempt, error = %e, "Fetch attempt failed");

                    if attempt >= max_attempts {
                        return Err(FetchError {
                            target: target.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }

                    tokio::time::sleep(self.policy.delay_after(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}

// The encoded target is appended directly, so the base must end in '/'
pub fn with_trailing_slash(mut base: String) -> String {
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

fn is_absolute_http(target: &str) -> bool {
    Url::parse(target)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is Fetcher generic over T?
//    - Fetcher<T: Transport> works with anything that implements Transport
//    - main.rs uses ProxyClient (real HTTP), tests use FakeTransport
//    - The compiler generates a separate copy per T, so there is no runtime cost
//
// 2. Why loop instead of for?
//    - The loop either returns Ok(result) or Err(FetchError)
//    - With `loop`, the compiler knows there is no "fell off the end" case
//
// 3. Duration * u32
//    - std implements Mul<u32> for Duration, so `base_delay * attempt` just works
// -----------------------------------------------------------------------------
