// src/fetch/client.rs
// =============================================================================
// This module talks HTTP to the content-extraction proxy.
//
// The proxy (r.jina.ai by default) takes a URL in its path, fetches that page
// itself and answers with a cleaned-up representation: usually markdown text,
// sometimes JSON.
//
// Every request carries:
// - Authorization: Bearer <token>
// - Accept: */*
// - a fixed bot User-Agent
//
// The Transport trait is the seam between "how do I GET a URL" and the retry
// logic above it. Production uses ProxyClient (reqwest); tests plug in a fake.
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use super::FetchResult;

/// Base endpoint of the extraction proxy
pub const DEFAULT_PROXY_BASE: &str = "https://r.jina.ai/";

/// User-Agent sent with every proxy request
pub const BOT_USER_AGENT: &str = "Mozilla/5.0 (compatible; DocumentationBot/1.0)";

// Why a single GET failed
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, DNS, TLS, timeout or body-read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The proxy answered, but not with a 2xx
    #[error("HTTP {status}")]
    Status { status: u16 },
}

// Anything that can GET a URL and hand back a FetchResult.
//
// Implementations perform exactly one attempt; retrying is the caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResult, TransportError>;
}

// Connection settings for the extraction proxy
#[derive(Debug, Clone)]
pub struct ProxySettings {
    /// Prefix every absolute target URL is appended to (percent-encoded)
    pub base_url: String,
    /// Bearer token; None when JINA_API_TOKEN is not configured
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROXY_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

// Builds the Authorization header value.
//
// A missing token still yields a header ("Bearer " with nothing after it)
// instead of omitting it. The proxy decides what to do with that.
pub fn authorization_value(token: Option<&str>) -> String {
    format!("Bearer {}", token.unwrap_or_default())
}

// reqwest-backed Transport that sends the proxy headers on every request
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
}

impl ProxyClient {
    // Creates the HTTP client with the proxy headers baked in.
    //
    // We reuse this one client for every request (connection pooling).
    pub fn new(settings: &ProxySettings) -> Result<Self> {
        if settings.token.is_none() {
            warn!("JINA_API_TOKEN is not set, proxy requests will carry an empty bearer token");
        }

        let mut auth = HeaderValue::from_str(&authorization_value(settings.token.as_deref()))
            .context("JINA_API_TOKEN contains characters not allowed in an HTTP header")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BOT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ProxyClient {
    async fn get(&self, url: &str) -> Result<FetchResult, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("json"))
            .unwrap_or(false);

        let body = response.text().await?;

        // A JSON content type with a body that is not JSON stays plain text
        if is_json {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
                return Ok(FetchResult::from(value));
            }
        }

        Ok(FetchResult::Text(body))
    }
}
