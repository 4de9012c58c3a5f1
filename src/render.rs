//! Numbered [`Entry`]s for display: one expandable item per recommendation,
//! titled "Recommendation N".

use crate::selection::State;

/// One recommendation with its 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Position in the list, starting at 1.
    pub number: usize,
    /// Recommendation text, usually markdown.
    pub text: &'a str,
}

impl Entry<'_> {
    /// Separator between the title and the text when rendered with
    /// [`Display`].
    ///
    /// [`Display`]: std::fmt::Display
    pub const SEP: &'static str = "\n\n";

    /// Title shown when the entry is collapsed.
    pub fn title(&self) -> String {
        format!("Recommendation {}", self.number)
    }
}

impl std::fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recommendation {}{}{}", self.number, Self::SEP, self.text)
    }
}

/// Number `texts` starting at 1.
pub fn entries<S>(texts: &[S]) -> impl Iterator<Item = Entry<'_>>
where
    S: AsRef<str>,
{
    texts.iter().enumerate().map(|(i, text)| Entry {
        number: i + 1,
        text: text.as_ref(),
    })
}

impl State {
    /// Recommendations as numbered entries.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        entries(self.recommendations())
    }
}
