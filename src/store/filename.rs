// src/store/filename.rs
// =============================================================================
// Turns a document URL into a flat, filesystem-safe file name.
//
// Rules:
// - Well-formed absolute URL: use only its path ("/doc.intro")
// - Anything else: use the raw string
// - Drop one leading '/'
// - Every character outside [a-zA-Z0-9-] becomes '_'
// - Lower-case the result
//
// Example:
//   "https://example.com/Guides/Getting-Started.html" -> "guides_getting-started_html"
//
// This never fails, and it is lossy: different URLs can map to the same
// name (different hosts, '.' vs '_'). The later write wins.
// =============================================================================

use url::Url;

pub fn sanitize_filename(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => clean(parsed.path()),
        Err(_) => clean(url),
    }
}

fn clean(raw: &str) -> String {
    let raw = raw.strip_prefix('/').unwrap_or(raw);

    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
