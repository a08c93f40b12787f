// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is also the validation boundary: the seed URL is checked here, so
// the scrape pipeline only ever sees a well-formed absolute http(s) URL.
//
// Settings that normally live in the environment (.env works too):
// - JINA_API_TOKEN  bearer token for the extraction proxy (env only)
// - JINA_BASE_URL   overrides --proxy-base
// - DOCS_DIR        overrides --docs-dir
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

use crate::fetch::{with_trailing_slash, DEFAULT_PROXY_BASE};
use crate::scrape::DEFAULT_PACE;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "doc-harvester",
    version = "0.1.0",
    about = "Scrape documentation pages through a content-extraction proxy and save them as markdown",
    long_about = "doc-harvester fetches a seed page through an extraction proxy (r.jina.ai by default), \
                  finds the documentation links inside it and saves every linked page as a markdown file. \
                  It only follows links one hop away from the seed."
)]
pub struct Cli {
    /// Show debug logs from every pipeline stage
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape the documentation linked from a seed URL
    ///
    /// Example: doc-harvester scrape https://example.com/docs --docs-dir ./docs
    Scrape(ScrapeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    /// Seed URL to start from (absolute http or https URL)
    #[arg(value_parser = parse_seed_url)]
    pub url: String,

    /// Print the outcome as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Directory the markdown files are written to
    #[arg(long, env = "DOCS_DIR", default_value = "docs")]
    pub docs_dir: PathBuf,

    /// Attempts per URL before giving up (at least 1)
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Backoff after the first failed attempt; attempt N waits N times this
    #[arg(long, default_value_t = 2000)]
    pub retry_delay_ms: u64,

    /// Pause after each processed link
    #[arg(long, default_value_t = DEFAULT_PACE.as_millis() as u64)]
    pub pace_ms: u64,

    /// Extraction proxy endpoint; the target URL is appended percent-encoded
    #[arg(long, env = "JINA_BASE_URL", default_value = DEFAULT_PROXY_BASE, value_parser = parse_proxy_base)]
    pub proxy_base: String,

    /// Timeout for a single HTTP request
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

// Accepts only absolute http/https URLs.
//
// The string is returned untouched (not normalized by the url crate), since
// it is what gets encoded into the proxy path.
fn parse_seed_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| format!("not a valid absolute URL: {}", e))?;

    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(format!("unsupported scheme '{}', expected http or https", other)),
    }
}

// Same rules as the seed URL, plus a trailing '/' so the encoded target
// lands in the path: "https://r.jina.ai" becomes "https://r.jina.ai/"
fn parse_proxy_base(raw: &str) -> Result<String, String> {
    parse_seed_url(raw).map(with_trailing_slash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("doc-harvester").chain(args.iter().copied()))
    }

    #[test]
    fn test_scrape_defaults() {
        let cli = parse(&["scrape", "https://example.com"]).unwrap();
        let Commands::Scrape(args) = cli.command;

        assert_eq!(args.url, "https://example.com");
        assert!(!args.json);
        assert_eq!(args.max_attempts, 3);
        assert_eq!(args.retry_delay_ms, 2000);
        assert_eq!(args.pace_ms, 2000);
        assert_eq!(args.timeout_secs, 30);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "scrape",
            "https://example.com/docs",
            "--json",
            "--max-attempts",
            "5",
            "--pace-ms",
            "0",
            "--proxy-base",
            "http://localhost:9000/",
            "-v",
        ])
        .unwrap();
        let Commands::Scrape(args) = cli.command;

        assert!(cli.verbose);
        assert!(args.json);
        assert_eq!(args.max_attempts, 5);
        assert_eq!(args.pace_ms, 0);
        assert_eq!(args.proxy_base, "http://localhost:9000/");
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(parse(&["scrape", "example.com/docs"]).is_err());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(parse(&["scrape", "ftp://example.com/docs"]).is_err());
    }

    #[test]
    fn test_proxy_base_gets_trailing_slash() {
        let cli = parse(&["scrape", "https://example.com", "--proxy-base", "https://r.jina.ai"]).unwrap();
        let Commands::Scrape(args) = cli.command;
        assert_eq!(args.proxy_base, "https://r.jina.ai/");
    }

    #[test]
    fn test_rejects_relative_proxy_base() {
        assert!(parse(&["scrape", "https://example.com", "--proxy-base", "r.jina.ai"]).is_err());
        assert!(parse(&["scrape", "https://example.com", "--proxy-base", "file:///tmp/"]).is_err());
    }

    #[test]
    fn test_rejects_zero_attempts() {
        assert!(parse(&["scrape", "https://example.com", "--max-attempts", "0"]).is_err());
    }
}
