// src/scrape/mod.rs
// =============================================================================
// This module ties the pipeline together: seed fetch, link discovery, and the
// sequential fetch-and-save loop. See pipeline.rs for the rules.
// =============================================================================

mod pipeline;

pub use pipeline::{ScrapeOutcome, Scraper, DEFAULT_PACE};
