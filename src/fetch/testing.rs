// src/fetch/testing.rs
// In-memory Transport for tests: scripted answers per URL, plus a log of
// every call with its (tokio) timestamp so tests can check backoff and pacing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;

use super::{FetchResult, Transport, TransportError};

pub const TEST_PROXY: &str = "https://proxy.test/";

// The URL the fetcher will actually request for `target`
pub fn proxied(target: &str) -> String {
    format!("{}{}", TEST_PROXY, urlencoding::encode(target))
}

enum Route {
    Respond(FetchResult),
    Fail(u16),
    // Fails `remaining` more times, then responds
    Flaky { remaining: u32, result: FetchResult },
}

#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, result: impl Into<FetchResult>) -> Self {
        self.route(url, Route::Respond(result.into()))
    }

    pub fn fail(self, url: &str, status: u16) -> Self {
        self.route(url, Route::Fail(status))
    }

    pub fn flaky(self, url: &str, failures: u32, result: FetchResult) -> Self {
        self.route(
            url,
            Route::Flaky {
                remaining: failures,
                result,
            },
        )
    }

    fn route(self, url: &str, route: Route) -> Self {
        self.routes.lock().unwrap().insert(url.to_string(), route);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<FetchResult, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(url) {
            Some(Route::Respond(result)) => Ok(result.clone()),
            Some(Route::Fail(status)) => Err(TransportError::Status { status: *status }),
            Some(Route::Flaky { remaining, result }) => {
                if *remaining > 0 {
                    *remaining -= 1;
                    Err(TransportError::Status { status: 503 })
                } else {
                    Ok(result.clone())
                }
            }
            None => Err(TransportError::Status { status: 404 }),
        }
    }
}
