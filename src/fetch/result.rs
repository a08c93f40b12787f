// src/fetch/result.rs
// =============================================================================
// The payload the extraction proxy hands back.
//
// The proxy does not promise a response shape: sometimes it is plain text
// (markdown), sometimes JSON. Instead of poking at the type at runtime we
// model every shape as one enum variant and let each pipeline stage match on
// it explicitly.
// =============================================================================

use serde_json::{Map, Value};

// What one upstream fetch produced
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// Unstructured body (markdown, HTML, a JSON document not yet parsed...)
    Text(String),
    /// A JSON array
    Sequence(Vec<Value>),
    /// A JSON object
    Mapping(Map<String, Value>),
    /// Anything else JSON can hold: null, booleans, numbers
    Unknown(Value),
}

impl FetchResult {
    // True when the fetch "succeeded" but there is nothing worth saving.
    // Arrays and objects always count as content, even when empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FetchResult::Text(text) => text.is_empty(),
            FetchResult::Unknown(Value::Null) => true,
            _ => false,
        }
    }

    // Converts the result into the text we write to disk.
    //
    // Text is kept exactly as received. Structured values are pretty-printed
    // with two-space indentation.
    pub fn into_text(self) -> String {
        let value = match self {
            FetchResult::Text(text) => return text,
            FetchResult::Sequence(items) => Value::Array(items),
            FetchResult::Mapping(map) => Value::Object(map),
            FetchResult::Unknown(value) => value,
        };

        // Serializing a Value cannot fail (all keys are strings already)
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

impl From<Value> for FetchResult {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => FetchResult::Text(text),
            Value::Array(items) => FetchResult::Sequence(items),
            Value::Object(map) => FetchResult::Mapping(map),
            other => FetchResult::Unknown(other),
        }
    }
}

impl From<String> for FetchResult {
    fn from(text: String) -> Self {
        FetchResult::Text(text)
    }
}
