// src/discover/mod.rs
// =============================================================================
// This module turns a fetched seed page into the list of pages to harvest.
//
// Only one hop: links found here are fetched and saved, but never searched
// for further links.
// =============================================================================

mod links;

pub use links::{extract_links, LinkSet};
