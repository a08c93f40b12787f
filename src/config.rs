// src/config.rs
// =============================================================================
// Collects the parsed CLI arguments and the environment into the settings
// each pipeline stage needs.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::ScrapeArgs;
use crate::fetch::{ProxySettings, RetryPolicy};

/// Environment variable holding the extraction proxy's bearer token
pub const TOKEN_ENV: &str = "JINA_API_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub proxy: ProxySettings,
    pub retry: RetryPolicy,
    /// Pause after every processed link
    pub pace: Duration,
    pub docs_dir: PathBuf,
}

impl Config {
    // Reads the token from the environment (after .env has been loaded)
    pub fn from_args(args: &ScrapeArgs) -> Self {
        Self::build(args, std::env::var(TOKEN_ENV).ok())
    }

    fn build(args: &ScrapeArgs, token: Option<String>) -> Self {
        // An empty variable counts as not set
        let token = token.filter(|t| !t.trim().is_empty());

        Self {
            proxy: ProxySettings {
                base_url: args.proxy_base.clone(),
                token,
                timeout: Duration::from_secs(args.timeout_secs),
            },
            retry: RetryPolicy {
                max_attempts: args.max_attempts,
                base_delay: Duration::from_millis(args.retry_delay_ms),
            },
            pace: Duration::from_millis(args.pace_ms),
            docs_dir: args.docs_dir.clone(),
        }
    }
}
