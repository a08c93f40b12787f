// src/scrape/pipeline.rs
// =============================================================================
// This module runs one documentation scrape from start to finish.
//
// How it works:
// 1. Seeding     - fetch the seed URL (with retries)
// 2. Discovering - pull "doc." links out of the seed content
// 3. Processing  - for each link, one at a time:
//                  fetch -> normalize to text -> sanitize name -> save
//                  then wait a fixed pacing delay
// 4. Done        - report how many links were saved
//
// Failure rules:
// - Seed fetch gives up          -> failed outcome, stop here
// - No links found               -> failed outcome, stop here
// - One link fails (fetch/save)  -> log it, move on to the next link
//
// Nothing in here returns an error: the caller always gets a ScrapeOutcome.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::discover::extract_links;
use crate::fetch::{FetchError, Fetcher, Transport};
use crate::store::{sanitize_filename, DocumentStore};

/// Delay between two processed links, to stay under upstream rate limits
pub const DEFAULT_PACE: Duration = Duration::from_millis(2000);

// The final report of one scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOutcome {
    pub success: bool,
    pub message: String,
    /// Number of documents actually written to disk
    pub processed_links: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeOutcome {
    fn completed(processed_links: usize) -> Self {
        Self {
            success: true,
            message: "Documentation scraping completed successfully".to_string(),
            processed_links,
            error: None,
        }
    }

    fn no_links() -> Self {
        Self {
            success: false,
            message: "No links found in the initial response".to_string(),
            processed_links: 0,
            error: None,
        }
    }

    fn seed_failed(err: &FetchError) -> Self {
        Self {
            success: false,
            message: "Failed to scrape documentation".to_string(),
            processed_links: 0,
            error: Some(err.to_string()),
        }
    }
}

pub struct Scraper<T> {
    fetcher: Fetcher<T>,
    store: DocumentStore,
    pace: Duration,
}

impl<T: Transport> Scraper<T> {
    pub fn new(fetcher: Fetcher<T>, store: DocumentStore, pace: Duration) -> Self {
        Self {
            fetcher,
            store,
            pace,
        }
    }

    // Scrapes the documentation reachable from `seed_url`.
    //
    // Links are processed sequentially; total run time is roughly
    // links * (pace + worst-case retries).
    pub async fn scrape_documentation(&self, seed_url: &str) -> ScrapeOutcome {
        info!(seed = %seed_url, "Starting documentation scrape");

        let seed = match self.fetcher.fetch(seed_url).await {
            Ok(seed) => seed,
            Err(e) => {
                error!(seed = %seed_url, error = %e, "Error during documentation scraping");
                return ScrapeOutcome::seed_failed(&e);
            }
        };

        let links = extract_links(&seed);
        info!(count = links.len(), links = ?links.as_slice(), "Found links to process");

        if links.is_empty() {
            return ScrapeOutcome::no_links();
        }

        let mut processed = 0;
        for (index, link) in links.iter().enumerate() {
            debug!(index, url = %link, "Processing link");

            if self.process_link(link).await.is_some() {
                processed += 1;
            }

            // Polite crawling: pause after every link, saved or not
            tokio::time::sleep(self.pace).await;
        }

        info!(processed, total = links.len(), "Documentation scrape finished");
        ScrapeOutcome::completed(processed)
    }

    // Fetches and saves one discovered link; None means it was skipped
    async fn process_link(&self, link: &str) -> Option<PathBuf> {
        let content = match self.fetcher.fetch(link).await {
            Ok(content) => content,
            Err(e) => {
                error!(url = %link, error = %e, "Failed to process link");
                return None;
            }
        };

        if content.is_empty() {
            warn!(url = %link, "No content received");
            return None;
        }

        let text = content.into_text();
        let name = sanitize_filename(link);

        match self.store.persist(&name, &text).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!(url = %link, error = %e, "Failed to save document");
                None
            }
        }
    }
}
