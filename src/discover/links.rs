// src/discover/links.rs
// =============================================================================
// This module finds follow-up documentation links inside a fetched seed page.
//
// There is no HTML or markdown parsing here. Discovery is pattern based:
// - text is scanned with a URL regex
// - JSON arrays/objects are searched for string values
// and in every case only URLs containing "doc." survive. That filter is a
// loose "looks like a documentation page" heuristic; false positives are
// expected and simply fail later when fetched.
//
// Policy (first matching branch wins):
// 1. Text that parses as JSON is replaced by the parsed value (once)
// 2. Text            -> regex scan
// 3. Sequence        -> string elements
// 4. Mapping         -> values flattened one level, string entries
// 5. anything else   -> nothing
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use crate::fetch::FetchResult;

// http(s):// followed by anything up to whitespace, a double quote or a
// closing parenthesis (so "[text](url)" in markdown ends at the url)
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s")]+"#).expect("URL pattern is a valid regex"));

const DOC_MARKER: &str = "doc.";

// Unique URLs in the order they were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds a link; returns false if it was already present
    pub fn insert(&mut self, link: impl Into<String>) -> bool {
        let link = link.into();
        if self.seen.contains(&link) {
            return false;
        }
        self.seen.insert(link.clone());
        self.links.push(link);
        true
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.links
    }
}

impl<S: Into<String>> FromIterator<S> for LinkSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LinkSet::new();
        for link in iter {
            set.insert(link);
        }
        set
    }
}

impl IntoIterator for LinkSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

// Extracts documentation links from a fetch result
pub fn extract_links(result: &FetchResult) -> LinkSet {
    match result {
        FetchResult::Text(text) => match parse_structured(text) {
            // Re-interpret once; a JSON string literal lands in the text branch
            Ok(value) => links_in_value(&value),
            Err(e) => {
                debug!(error = %e, "Content is not JSON, scanning it as text");
                links_in_text(text)
            }
        },
        FetchResult::Sequence(items) => links_in_values(items.iter()),
        FetchResult::Mapping(map) => links_in_values(flatten(map.values())),
        FetchResult::Unknown(_) => LinkSet::new(),
    }
}

fn parse_structured(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

// Same branches as extract_links, minus the JSON re-parse
fn links_in_value(value: &Value) -> LinkSet {
    match value {
        Value::String(text) => links_in_text(text),
        Value::Array(items) => links_in_values(items.iter()),
        Value::Object(map) => links_in_values(flatten(map.values())),
        _ => LinkSet::new(),
    }
}

fn links_in_text(text: &str) -> LinkSet {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|link| link.contains(DOC_MARKER))
        .collect()
}

fn links_in_values<'a>(values: impl Iterator<Item = &'a Value>) -> LinkSet {
    values
        .filter_map(Value::as_str)
        .filter(|link| link.contains(DOC_MARKER))
        .collect()
}

// Spreads array values one level deep; other values pass through untouched
fn flatten<'a>(values: impl Iterator<Item = &'a Value>) -> impl Iterator<Item = &'a Value> {
    values.flat_map(|value| match value {
        Value::Array(items) => items.iter().collect::<Vec<_>>(),
        other => vec![other],
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Lazy?
//    - Compiling a regex is slow compared to running it
//    - Lazy compiles it on first use and keeps it for the rest of the program
//
// 2. Why does LinkSet keep both a Vec and a HashSet?
//    - The HashSet answers "seen this already?" in O(1)
//    - The Vec remembers the order links were found in
// -----------------------------------------------------------------------------
