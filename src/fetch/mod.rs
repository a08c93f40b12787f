// src/fetch/mod.rs
// =============================================================================
// This module gets content out of the extraction proxy.
//
// Submodules:
// - result: FetchResult, the "text or JSON" payload type
// - client: the reqwest client and the Transport trait
// - retry: proxy routing + fetch-with-retry on top of any Transport
// =============================================================================

mod client;
mod result;
mod retry;

#[cfg(test)]
pub mod testing;

pub use client::{ProxyClient, ProxySettings, Transport, TransportError, DEFAULT_PROXY_BASE};
pub use result::FetchResult;
pub use retry::{with_trailing_slash, FetchError, Fetcher, RetryPolicy};
