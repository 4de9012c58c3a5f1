//! Gemini `generateContent` request body. We call it [`Prompt`] since in
//! actual usage this makes the code more readable.
//!
//! ```json
//! { "contents": [{ "parts": [{ "text": "..." }] }] }
//! ```

use serde::{Deserialize, Serialize};

/// Request body for the Gemini `generateContent` endpoint.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
pub struct Prompt {
    /// Input [`Content`]s. For a single-turn request this is one entry.
    pub contents: Vec<Content>,
}

impl Prompt {
    /// A single-turn prompt with one text [`Part`].
    pub fn text<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        Self::default().add_content(Content::text(text))
    }

    /// Add a [`Content`] to [`contents`].
    ///
    /// [`contents`]: Prompt::contents
    pub fn add_content<C>(mut self, content: C) -> Self
    where
        C: Into<Content>,
    {
        self.contents.push(content.into());
        self
    }

    /// The text of the first [`Part`] of the first [`Content`], if any.
    pub fn first_text(&self) -> Option<&str> {
        self.contents
            .first()?
            .parts
            .first()
            .map(|part| part.text.as_str())
    }
}

/// One turn of input, made of [`Part`]s.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
pub struct Content {
    /// Parts of the content.
    pub parts: Vec<Part>,
}

impl Content {
    /// Content with a single text [`Part`].
    pub fn text<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

/// A text part of a [`Content`].
#[derive(Debug, Clone, Serialize, Deserialize, derive_more::Display)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[display("{text}")]
pub struct Part {
    /// The actual text content.
    pub text: String,
}
