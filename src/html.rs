use std::ops::Deref;

use pulldown_cmark::{html::push_html, Event, Parser};

use crate::render::Entry;

/// Immutable wrapper around a [`String`]. Guaranteed to be valid HTML.
#[derive(Debug, Clone, Default, derive_more::Display)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
#[display("{inner}")]
pub struct Html {
    inner: String,
}

impl Html {
    /// Append markdown `text` rendered as HTML. Raw HTML in the markdown is
    /// escaped rather than passed through, since it comes from the model.
    pub fn push_markdown(&mut self, text: &str) {
        let events = Parser::new(text).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        push_html(&mut self.inner, events);
    }

    /// Append an [`Entry`] as a collapsed `<details>` element.
    pub fn push_entry(&mut self, entry: &Entry<'_>) {
        self.inner.push_str("<details>\n<summary>");
        // The title is plain text we generate, nothing to escape.
        self.inner.push_str(&entry.title());
        self.inner.push_str("</summary>\n");
        self.push_markdown(entry.text);
        self.inner.push_str("</details>\n");
    }
}

impl From<Html> for String {
    fn from(html: Html) -> Self {
        html.inner
    }
}

impl AsRef<str> for Html {
    fn as_ref(&self) -> &str {
        self.deref()
    }
}

impl std::borrow::Borrow<str> for Html {
    fn borrow(&self) -> &str {
        self.as_ref()
    }
}

impl std::ops::Deref for Html {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'a> FromIterator<Entry<'a>> for Html {
    fn from_iter<T: IntoIterator<Item = Entry<'a>>>(iter: T) -> Self {
        let mut html = Html::default();
        for entry in iter {
            html.push_entry(&entry);
        }
        html
    }
}

/// A trait for types that can be converted to HTML.
pub trait ToHtml {
    /// Render the type to an HTML string.
    fn html(&self) -> Html;
}

impl ToHtml for Entry<'_> {
    fn html(&self) -> Html {
        let mut html = Html::default();
        html.push_entry(self);
        html
    }
}

impl ToHtml for crate::selection::State {
    /// Every recommendation as a `<details>` element, in order.
    fn html(&self) -> Html {
        self.entries().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{Event, State};

    #[test]
    fn test_entry_html() {
        let entry = Entry {
            number: 3,
            text: "**Piranesi** by Susanna Clarke",
        };
        assert_eq!(
            entry.html().as_ref(),
            "<details>\n<summary>Recommendation 3</summary>\n<p><strong>Piranesi</strong> by Susanna Clarke</p>\n</details>\n"
        );
    }

    #[test]
    fn test_raw_html_escaped() {
        let mut html = Html::default();
        html.push_markdown("Read <script>alert(1)</script> this");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_state_html() {
        let mut state = State::new();
        assert_eq!(state.html().as_ref(), "");

        state.dispatch(Event::AppendRecommendations(vec![
            "one".into(),
            "two".into(),
        ]));
        let html: String = state.html().into();
        assert_eq!(html.matches("<details>").count(), 2);
        assert!(html.contains("<summary>Recommendation 2</summary>"));
    }
}
