//! [`Response`] type for the Gemini `generateContent` endpoint.
//!
//! Only the outer object is required to parse. Each entry of `candidates` is
//! inspected on its own so one malformed candidate doesn't spoil the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful API response.
///
/// ```json
/// { "candidates": [ { "content": { "parts": [ { "text": "..." } ] } } ] }
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Raw candidate entries. Anything other than an array is treated as no
    /// candidates at all.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub candidates: Value,
}

impl Response {
    /// JSON pointer to the primary text of a candidate.
    pub const TEXT_POINTER: &'static str = "/content/parts/0/text";

    /// Raw candidate entries, empty if `candidates` is absent or not an array.
    pub fn candidates(&self) -> &[Value] {
        match &self.candidates {
            Value::Array(candidates) => candidates,
            _ => &[],
        }
    }

    /// Primary text of every candidate that has one, in order. Candidates
    /// without a non-empty string at [`Self::TEXT_POINTER`] are skipped.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.candidates().iter().filter_map(candidate_text)
    }

    /// Number of candidates that were present but had no usable text.
    pub fn dropped(&self) -> usize {
        self.candidates()
            .iter()
            .filter(|c| candidate_text(c).is_none())
            .count()
    }

    /// Owned primary texts. See [`Self::texts`].
    pub fn into_texts(self) -> Vec<String> {
        match self.candidates {
            Value::Array(candidates) => candidates
                .into_iter()
                .filter_map(|mut candidate| {
                    match candidate.pointer_mut(Self::TEXT_POINTER)?.take() {
                        Value::String(text) if !text.is_empty() => Some(text),
                        _ => None,
                    }
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn candidate_text(candidate: &Value) -> Option<&str> {
    candidate
        .pointer(Response::TEXT_POINTER)?
        .as_str()
        .filter(|text| !text.is_empty())
}
